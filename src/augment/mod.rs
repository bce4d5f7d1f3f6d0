use crate::wire::{ApplicationCategory, FileSet};

pub const INDEX_HTML: &str = "index.html";
pub const SEED_DATA_PATH: &str = "data/crud_data.json";
pub const SEED_DATA_DEFAULT: &str = "[]";

/// Presentation tier of a CRUD project.
pub const CRUD_FRONTEND: [&str; 3] = [INDEX_HTML, "styles.css", "script.js"];
/// Service tier of a CRUD project.
pub const CRUD_BACKEND: [&str; 3] = ["server.js", SEED_DATA_PATH, "README.md"];

const CRUD_PATHS: [&str; 6] = [
    CRUD_FRONTEND[0], CRUD_FRONTEND[1], CRUD_FRONTEND[2],
    CRUD_BACKEND[0], CRUD_BACKEND[1], CRUD_BACKEND[2],
];
const STATIC_PATHS: [&str; 5] = [
    INDEX_HTML, "styles.css", "script.js", "assets/css/custom.css", "assets/js/main.js",
];

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css";
const BOOTSTRAP_JS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/js/bootstrap.bundle.min.js";
const FONT_AWESOME_CSS: &str = "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.0.0/css/all.min.css";
const GOOGLE_FONTS_CSS: &str = "https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&family=Poppins:wght@400;500;600;700&display=swap";
const JQUERY_JS: &str = "https://code.jquery.com/jquery-3.6.0.min.js";
const AOS_CSS: &str = "https://unpkg.com/aos@2.3.1/dist/aos.css";
const AOS_JS: &str = "https://unpkg.com/aos@2.3.1/dist/aos.js";

const STATIC_INIT_SCRIPT: &str = r#"<script>
    // Initialize AOS
    AOS.init();

    // Initialize Bootstrap tooltips and popovers
    var tooltipTriggerList = [].slice.call(document.querySelectorAll('[data-bs-toggle="tooltip"]'))
    var tooltipList = tooltipTriggerList.map(function (tooltipTriggerEl) {
        return new bootstrap.Tooltip(tooltipTriggerEl)
    })

    var popoverTriggerList = [].slice.call(document.querySelectorAll('[data-bs-toggle="popover"]'))
    var popoverList = popoverTriggerList.map(function (popoverTriggerEl) {
        return new bootstrap.Popover(popoverTriggerEl)
    })
</script>"#;

/// Paths that always end up in the archive for `category`, in archive order.
pub fn required_paths(category: ApplicationCategory) -> &'static [&'static str] {
    match category {
        ApplicationCategory::Crud => &CRUD_PATHS,
        ApplicationCategory::Static => &STATIC_PATHS,
    }
}

pub fn default_content(path: &str) -> &'static str {
    if path == SEED_DATA_PATH { SEED_DATA_DEFAULT } else { "" }
}

/// Content of a layout member: the generated body, or the default when the
/// generator left it out or emitted it empty.
pub fn layout_content<'a>(files: &'a FileSet, path: &str) -> &'a str {
    files
        .get(path)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| default_content(path))
}

/// Select the category's required files from `files`, filling gaps with
/// defaults, and wrap `index.html` in the category's document shell. Every
/// other member is passed through unchanged; files outside the layout are
/// not carried over.
pub fn augment(files: &FileSet, category: ApplicationCategory) -> FileSet {
    let mut out = FileSet::new();
    for &path in required_paths(category) {
        let content = layout_content(files, path);
        if path == INDEX_HTML {
            out.insert(path, wrap_index(content, category));
        } else {
            out.insert(path, content);
        }
    }
    out
}

pub fn wrap_index(body: &str, category: ApplicationCategory) -> String {
    let mut s = String::with_capacity(body.len() + 3_000);
    let title = match category {
        ApplicationCategory::Crud => "CRUD Application",
        ApplicationCategory::Static => "Generated Website",
    };

    s.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    s.push_str("    <meta charset=\"UTF-8\">\n");
    s.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    s.push_str(&format!("    <title>{title}</title>\n"));
    push_stylesheet(&mut s, "Bootstrap 5 CSS", BOOTSTRAP_CSS);
    push_stylesheet(&mut s, "Font Awesome 6", FONT_AWESOME_CSS);
    push_stylesheet(&mut s, "Google Fonts", GOOGLE_FONTS_CSS);
    if category == ApplicationCategory::Static {
        push_stylesheet(&mut s, "AOS Library", AOS_CSS);
    }
    s.push_str("    <!-- Custom CSS -->\n");
    s.push_str("    <link href=\"styles.css\" rel=\"stylesheet\">\n");
    if category == ApplicationCategory::Static {
        s.push_str("    <link href=\"assets/css/custom.css\" rel=\"stylesheet\">\n");
    }
    s.push_str("</head>\n<body>\n");

    s.push_str(body);
    s.push('\n');

    push_script(&mut s, "Bootstrap 5 JS Bundle", BOOTSTRAP_JS);
    push_script(&mut s, "jQuery", JQUERY_JS);
    if category == ApplicationCategory::Static {
        push_script(&mut s, "AOS Library", AOS_JS);
    }
    s.push_str("<!-- Custom JS -->\n");
    s.push_str("<script src=\"script.js\"></script>\n");
    if category == ApplicationCategory::Static {
        s.push_str("<script src=\"assets/js/main.js\"></script>\n");
        s.push_str(STATIC_INIT_SCRIPT);
        s.push('\n');
    }
    s.push_str("</body>\n</html>");
    s
}

fn push_stylesheet(s: &mut String, label: &str, href: &str) {
    s.push_str(&format!("    <!-- {label} -->\n    <link href=\"{href}\" rel=\"stylesheet\">\n"));
}

fn push_script(s: &mut String, label: &str, src: &str) {
    s.push_str(&format!("<!-- {label} -->\n<script src=\"{src}\"></script>\n"));
}
