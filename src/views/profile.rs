use crate::identity::IdentityCell;
use crate::router::View;
use crate::views::{escape_html, PROFILE_VIEW};

/// Shows the signed-in user. An unresolved or failed identity counts as
/// signed out.
pub fn profile_view(identity: &IdentityCell) -> View {
    match identity.peek() {
        Some(Ok(identity)) => View::new(PROFILE_VIEW, "profile-view")
            .with_title("Your Profile")
            .with_html(format!(
                r#"<div class="profile-view"><h3 class="title">Your Profile</h3><span class="email">{}</span></div>"#,
                escape_html(&identity.email)
            )),
        _ => View::new(PROFILE_VIEW, "sign-in-view")
            .with_title("Sign in required")
            .with_html(concat!(
                r#"<div class="sign-in-view"><h3 class="title">Sign in required</h3>"#,
                r#"<div class="g-signin2" data-onsuccess="googleSignIn"></div></div>"#,
            )),
    }
}
