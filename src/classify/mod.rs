use crate::wire::ApplicationCategory;

const CRUD_TOKEN: &str = "crud";

/// Category of the app the prompt asks for. Depends on the prompt text only;
/// the caller's requested type never influences it.
pub fn classify(prompt: &str) -> ApplicationCategory {
    if prompt.to_ascii_lowercase().contains(CRUD_TOKEN) {
        ApplicationCategory::Crud
    } else {
        ApplicationCategory::Static
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crud_token_matches_in_any_case() {
        for p in ["Build a CRUD app", "build a crud app", "BUILD A CRUD APP", "a CrUd thing"] {
            assert_eq!(classify(p), ApplicationCategory::Crud, "{p}");
        }
    }

    #[test]
    fn substring_inside_word_still_counts() {
        assert_eq!(classify("supercrudapp"), ApplicationCategory::Crud);
    }

    #[test]
    fn anything_else_is_static() {
        assert_eq!(classify("build a landing page"), ApplicationCategory::Static);
        assert_eq!(classify("c r u d"), ApplicationCategory::Static);
    }
}
