use crate::router::View;
use crate::views::LANDING_VIEW;

pub fn landing_view() -> View {
    View::new(LANDING_VIEW, "landing-view")
        .with_title("Learn JavaScript, one puzzle at a time")
        .with_html(concat!(
            r#"<div class="landing-view">"#,
            r#"<h1 class="title">Learn JavaScript, one puzzle at a time</h1>"#,
            r##"<a class="start-btn" href="#problem-1">Start Now!</a>"##,
            r#"</div>"#,
        ))
}
