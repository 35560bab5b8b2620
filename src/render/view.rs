use crate::slots::Slide;

/// Track offset for a slide index, as a CSS transform value.
pub fn track_transform(index: usize) -> String {
    format!("translateX(-{}%)", index * 100)
}

/// Full carousel markup for a container: scoped style block, slide track
/// and indicator dots. Replacing the container content with this is
/// idempotent.
pub fn carousel_markup(container_id: &str, slides: &[Slide]) -> String {
    let mut html = style_block(container_id);

    html.push_str("<div class=\"br-wrapper\">");
    for slide in slides {
        html.push_str("<div class=\"br-item\">");
        if let Some(link) = &slide.link {
            html.push_str(&format!(
                "<a href=\"{}\" target=\"_blank\">",
                escape(link)
            ));
        }
        html.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\">",
            escape(&slide.url),
            escape(slide.alt.as_deref().unwrap_or(""))
        ));
        if slide.link.is_some() {
            html.push_str("</a>");
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");

    html.push_str("<div class=\"br-dots\">");
    for index in 0..slides.len() {
        html.push_str(&format!(
            "<button class=\"br-dot\" data-index=\"{index}\"></button>"
        ));
    }
    html.push_str("</div>");

    html
}

/// Spinner placeholder shown while the configuration fetch is in flight.
pub fn loading_markup() -> String {
    "<div class=\"br-loading\" style=\"height:300px; display:flex; \
     align-items:center; justify-content:center; background:#f9f9f9; \
     border-radius:8px;\">\
     <i class=\"fluigicon fluigicon-loader fluigicon-is-animated icon-md\"></i>\
     </div>"
        .to_string()
}

/// Informational notice for a configuration with zero qualifying slots.
pub fn empty_markup(widget_id: &str) -> String {
    format!(
        "<div class=\"alert alert-info\" style=\"margin:0;\">\
         No active banners for \"{}\".</div>",
        escape(widget_id)
    )
}

/// Warning shown when initialization fails, carrying the failure cause.
pub fn warning_markup(detail: &str) -> String {
    format!(
        "<div class=\"alert alert-warning\" style=\"margin:0;\">\
         <i class=\"fluigicon fluigicon-exclamation-sign\"></i> \
         <strong>Warning:</strong> {}\
         <br><small>Check the browser console for details.</small></div>",
        escape(detail)
    )
}

// The 0.6s transition must stay shorter than the shortest configured
// slide duration, or two transitions overlap.
fn style_block(container_id: &str) -> String {
    format!(
        "<style>\
         #{id} {{ position: relative; overflow: hidden; width: 100%; \
         aspect-ratio: 21/9; border-radius: 8px; background: #000; }}\
         .br-wrapper {{ display: flex; transition: transform 0.6s \
         cubic-bezier(0.4, 0, 0.2, 1); height: 100%; width: 100%; }}\
         .br-item {{ min-width: 100%; height: 100%; flex-shrink: 0; }}\
         .br-item img {{ width: 100%; height: 100%; object-fit: cover; \
         display: block; border: none; }}\
         .br-dots {{ position: absolute; bottom: 12px; width: 100%; \
         display: flex; justify-content: center; gap: 6px; z-index: 5; }}\
         .br-dot {{ width: 8px; height: 8px; border-radius: 50%; \
         background: rgba(255,255,255,0.4); border: none; padding: 0; \
         cursor: pointer; transition: 0.3s; }}\
         .br-dot.active {{ background: #fff; width: 24px; \
         border-radius: 4px; }}\
         </style>",
        id = container_id
    )
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
