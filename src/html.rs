/// HTML tables shared by the tokenizer, extractor and URL locator.

pub const COMMENT_OPEN: &str = "<!--";
pub const COMMENT_CLOSE: &str = "-->";

/// Tag names representing the comment delimiters in the tag list
pub const COMMENT_OPEN_NAME: &str = "!--";
pub const COMMENT_CLOSE_NAME: &str = "--";

/// Elements whose body is never tokenized as markup.
const SCRIPT_STYLE: &[&str] = &["script", "style"];

/// Historical set that also keeps `<pre>` bodies verbatim.
const SCRIPT_STYLE_PRE: &[&str] = &["script", "style", "pre"];

/// Which elements are treated as raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawTextElements {
    #[default]
    ScriptStyle,
    ScriptStylePre,
}

impl RawTextElements {
    pub fn names(&self) -> &'static [&'static str] {
        match self {
            RawTextElements::ScriptStyle => SCRIPT_STYLE,
            RawTextElements::ScriptStylePre => SCRIPT_STYLE_PRE,
        }
    }

    /// The configured raw-text name equal (ignoring ASCII case) to `name`
    pub fn lookup(&self, name: &str) -> Option<&'static str> {
        self.names()
            .iter()
            .copied()
            .find(|raw| raw.eq_ignore_ascii_case(name))
    }
}

/// Element whose text body is a stylesheet
pub const STYLE_ELEMENT: &str = "style";

/// Attribute holding inline CSS declarations
pub const STYLE_ATTRIBUTE: &str = "style";

/// `(tag-name prefix, attribute)` pairs that carry a URL.
///
/// A tag matches when its name starts with the prefix, so `img/` (a
/// self-closed `<img ... />`) still matches `img`.
pub const URL_ATTRIBUTES: &[(&str, &str)] = &[
    // anchors and links
    ("a", "href"),
    ("area", "href"),
    ("base", "href"),
    ("link", "href"),
    ("blockquote", "cite"),
    ("q", "cite"),
    ("del", "cite"),
    ("ins", "cite"),
    ("head", "profile"),
    // images
    ("img", "src"),
    ("img", "lowsrc"),
    ("img", "longdesc"),
    ("img", "usemap"),
    ("input", "src"),
    ("input", "usemap"),
    // forms
    ("form", "action"),
    ("button", "formaction"),
    ("input", "formaction"),
    // frames
    ("frame", "src"),
    ("frame", "longdesc"),
    ("iframe", "src"),
    ("iframe", "longdesc"),
    // objects and embedded media
    ("object", "data"),
    ("object", "codebase"),
    ("object", "usemap"),
    ("object", "classid"),
    ("applet", "code"),
    ("applet", "codebase"),
    ("embed", "src"),
    ("source", "src"),
    ("audio", "src"),
    ("video", "src"),
    ("video", "poster"),
    ("track", "src"),
    // scripts
    ("script", "src"),
    // backgrounds
    ("body", "background"),
    ("table", "background"),
    ("thead", "background"),
    ("tbody", "background"),
    ("tfoot", "background"),
    ("tr", "background"),
    ("th", "background"),
    ("td", "background"),
];

/// Attributes of `name` that may carry a URL, in table order
pub fn url_attributes(name: &str) -> impl Iterator<Item = &'static str> + '_ {
    URL_ATTRIBUTES
        .iter()
        .filter(move |(prefix, _)| name.starts_with(prefix))
        .map(|(_, attribute)| *attribute)
}
