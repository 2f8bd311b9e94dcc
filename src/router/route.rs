/// A parsed URL fragment: `#<view>` or `#<view>-<arg>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub view: String,
    pub arg: Option<String>,
}

impl Route {
    /// Parse a fragment, with or without its leading `#`.
    ///
    /// Only the first `-` separates view from argument, so `#problem-1-b`
    /// yields argument `1-b`. An empty view name maps to `landing`.
    pub fn parse(fragment: &str, landing: &str) -> Self {
        let rest = fragment.strip_prefix('#').unwrap_or(fragment);
        let (view, arg) = match rest.split_once('-') {
            Some((view, arg)) => (view, Some(arg.to_owned())),
            None => (rest, None),
        };
        let view = if view.is_empty() { landing } else { view };
        Self {
            view: view.to_owned(),
            arg,
        }
    }
}
