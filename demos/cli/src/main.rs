use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cooldown_core::{CooldownConfig, SystemClock, TimerDraft, TimerId, TimerStore, TimerView};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod file_storage;

use file_storage::FileStorage;

#[derive(Parser, Debug)]
#[command(
    name = "cooldown-cli",
    about = "Quản lý bộ đếm ngược từ dòng lệnh, dùng chung store với widget web."
)]
struct Args {
    /// File JSON thay cho localStorage.
    #[arg(short, long, default_value = "cooldown-store.json")]
    store: PathBuf,

    /// Ghi log chi tiết (lặp lại để tăng mức).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Liệt kê các bộ đếm.
    List,
    /// Tạo bộ đếm mới.
    Add {
        #[arg(short, long)]
        name: String,
        /// Thời lượng (giây).
        #[arg(short, long)]
        duration: String,
    },
    /// Bắt đầu, hoặc tạm dừng nếu đang chạy.
    Start { id: i64 },
    Pause { id: i64 },
    /// Đếm lại từ đầu.
    Reset { id: i64 },
    /// Kiểm tra hạn một lần.
    Tick,
    /// Tick mỗi chu kỳ cho tới khi không còn bộ đếm nào chạy.
    Watch,
    /// Xem hoặc đổi theme.
    Theme {
        #[arg(long)]
        toggle: bool,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cooldown_core={level},cooldown_cli={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let storage = FileStorage::new(&args.store);
    let mut store = TimerStore::load(storage, SystemClock, CooldownConfig::default());
    info!(store = %args.store.display(), "đã mở store");

    match args.command {
        Command::List => print_views(&store.render()),
        Command::Add { name, duration } => {
            let draft = TimerDraft::parse(&name, &duration)
                .with_context(|| format!("Thời lượng không hợp lệ: {duration:?}"))?;
            let id = store
                .create(&draft)
                .with_context(|| format!("Không tạo được bộ đếm {name:?}"))?;
            println!("Created timer {id}");
        }
        Command::Start { id } => {
            let running = store
                .toggle(TimerId(id))
                .with_context(|| format!("Không đổi trạng thái bộ đếm {id}"))?;
            println!("Timer {id} {}", if running { "started" } else { "paused" });
        }
        Command::Pause { id } => {
            store
                .pause(TimerId(id))
                .with_context(|| format!("Không tạm dừng được bộ đếm {id}"))?;
            println!("Timer {id} paused");
        }
        Command::Reset { id } => {
            store
                .reset(TimerId(id))
                .with_context(|| format!("Không đặt lại được bộ đếm {id}"))?;
            println!("Timer {id} restarted");
        }
        Command::Tick => {
            let outcome = store.tick().context("Tick thất bại")?;
            for id in outcome.expired {
                println!("Timer {id} is ready");
            }
            print_views(&store.render());
        }
        Command::Watch => {
            let interval = Duration::from_millis(u64::from(store.config().tick_interval_ms));
            loop {
                let outcome = store.tick().context("Tick thất bại")?;
                for id in &outcome.expired {
                    println!("Timer {id} is ready");
                }
                if !store.has_running() {
                    break;
                }
                print_views(&store.render());
                thread::sleep(interval);
            }
            print_views(&store.render());
        }
        Command::Theme { toggle } => {
            let theme = if toggle {
                store.toggle_theme().context("Không lưu được theme")?
            } else {
                store.theme()
            };
            println!("{}", theme.as_str());
        }
    }

    Ok(())
}

fn print_views(views: &[TimerView]) {
    if views.is_empty() {
        println!("No timers yet.");
        return;
    }
    for view in views {
        println!(
            "{:<15} {:<24} {:>9} {:>5.1}% {}",
            view.id.to_string(),
            view.name,
            view.label,
            view.progress,
            view.action.label()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_command() {
        let args = Args::try_parse_from([
            "cooldown-cli",
            "--store",
            "/tmp/x.json",
            "add",
            "--name",
            "Boss Fight",
            "--duration",
            "5",
        ])
        .unwrap();
        assert_eq!(args.store, PathBuf::from("/tmp/x.json"));
        assert!(matches!(
            args.command,
            Command::Add { ref name, ref duration } if name == "Boss Fight" && duration == "5"
        ));
    }

    #[test]
    fn theme_toggle_flag_is_optional() {
        let args = Args::try_parse_from(["cooldown-cli", "-vv", "theme"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.command, Command::Theme { toggle: false }));
    }
}
