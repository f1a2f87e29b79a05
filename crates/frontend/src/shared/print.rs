//! Печать через скрытый iframe.

use wasm_bindgen::JsCast;
use web_sys::HtmlIFrameElement;

const FRAME_ID: &str = "print-frame";

/// HTML page with a single centred image, sized for a label printer.
pub fn image_document(src: &str, caption: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><meta charset="utf-8"><style>@page{{margin:0}}body{{margin:0;display:flex;flex-direction:column;align-items:center;font-family:sans-serif}}img{{max-width:100%}}</style></head><body onload="window.focus();window.print()"><img src="{}"/><div>{}</div></body></html>"#,
        escape_attr(src),
        escape_text(caption)
    )
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Loads `html` into a reused hidden iframe; the document prints itself on load.
pub fn print_html(html: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document".to_string())?;

    let frame: HtmlIFrameElement = match document.get_element_by_id(FRAME_ID) {
        Some(el) => el
            .dyn_into()
            .map_err(|_| "print frame has wrong type".to_string())?,
        None => {
            let el: HtmlIFrameElement = document
                .create_element("iframe")
                .map_err(|e| format!("{e:?}"))?
                .dyn_into()
                .map_err(|_| "iframe expected".to_string())?;
            el.set_id(FRAME_ID);
            let _ = el.set_attribute(
                "style",
                "position:fixed;right:0;bottom:0;width:0;height:0;border:0;visibility:hidden;",
            );
            let body = document.body().ok_or_else(|| "no body".to_string())?;
            body.append_child(&el).map_err(|e| format!("{e:?}"))?;
            el
        }
    };
    frame.set_srcdoc(html);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_document_escapes_input() {
        let html = image_document("data:image/png;base64,AA\"", "P-1 <Насос>");
        assert!(html.contains(r#"src="data:image/png;base64,AA&quot;""#));
        assert!(html.contains("P-1 &lt;Насос&gt;"));
        assert!(html.contains("window.print()"));
    }
}
