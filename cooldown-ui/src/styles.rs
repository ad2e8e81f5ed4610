#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-cooldown-ui]";
const STYLE_VERSION_ATTR: &str = "data-cooldown-ui";
/// Tăng khi đổi `DEFAULT_STYLES` để trang đang mở nhận CSS mới.
const STYLE_VERSION: &str = "v1";

/// CSS mặc định cùng các biến dễ ghi đè; `body.dark-mode` đổi bảng màu.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --cooldown-font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --cooldown-bg: #f8fafc;
  --cooldown-text: #1f2933;
  --timer-background: #ffffff;
  --timer-ready-background: rgba(16, 185, 129, 0.14);
  --progress-bar-color: rgba(37, 99, 235, 0.22);
  --cooldown-notice: #b42318;
  --cooldown-radius: 12px;
}

body.dark-mode {
  --cooldown-bg: #11181c;
  --cooldown-text: #e4e7eb;
  --timer-background: #1f2933;
  --timer-ready-background: rgba(16, 185, 129, 0.24);
  --progress-bar-color: rgba(96, 165, 250, 0.32);
  --cooldown-notice: #f97066;
}

.cooldown-root {
  font-family: var(--cooldown-font-family);
  background: var(--cooldown-bg);
  color: var(--cooldown-text);
  display: flex;
  flex-direction: column;
  gap: 16px;
  padding: 20px;
}

.cooldown-toolbar,
.cooldown-form {
  display: flex;
  gap: 8px;
  align-items: center;
  flex-wrap: wrap;
}

.cooldown-notice {
  color: var(--cooldown-notice);
  margin: 0;
}

.timer {
  display: flex;
  justify-content: space-between;
  align-items: center;
  padding: 12px 16px;
  border-radius: var(--cooldown-radius);
  background: var(--timer-background);
}

.timer-ready {
  background: var(--timer-ready-background);
}

.timer-name {
  font-weight: 600;
}

.timer-time {
  font-variant-numeric: tabular-nums;
}

.btn {
  border: none;
  border-radius: 8px;
  padding: 6px 12px;
  cursor: pointer;
}
"#;

/// Chèn stylesheet một lần; thẻ cũ từ phiên bản khác được ghi đè nội dung tại chỗ.
pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if let Some(existing) = document.query_selector(STYLE_TAG_SELECTOR)? {
        if existing.get_attribute(STYLE_VERSION_ATTR).as_deref() != Some(STYLE_VERSION) {
            existing.set_attribute(STYLE_VERSION_ATTR, STYLE_VERSION)?;
            existing.set_text_content(Some(DEFAULT_STYLES));
        }
        return Ok(());
    }

    let head: Node = match document.head() {
        Some(head) => head.dyn_into()?,
        None => document
            .document_element()
            .ok_or_else(|| JsValue::from_str("Document rỗng, không chèn được CSS"))?
            .dyn_into()?,
    };

    let style_el = document.create_element("style")?;
    style_el.set_attribute(STYLE_VERSION_ATTR, STYLE_VERSION)?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el)?;

    Ok(())
}
