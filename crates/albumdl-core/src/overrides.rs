//! Session-scoped settings overrides

use crate::settings::{space_replacer, Settings, STRUCTURED_TEMPLATE};
use std::ops::Deref;
use tracing::info;

/// Applies the console's settings overrides and reverts them on drop.
///
/// While the guard lives, `output` holds the structured template (when
/// `structured` is set) and `space_replacer` is installed (when
/// `replace_spaces` is set). Dropping the guard restores the previous
/// template and removes the replacer, whether the session ended normally,
/// through an error, or by unwinding.
#[derive(Debug)]
pub struct SessionOverrides<'a> {
    settings: &'a mut Settings,
    original_output: Option<String>,
    installed_replacer: bool,
}

impl<'a> SessionOverrides<'a> {
    pub fn apply(settings: &'a mut Settings) -> Self {
        let mut original_output = None;
        if settings.structured {
            original_output = Some(std::mem::replace(
                &mut settings.output,
                STRUCTURED_TEMPLATE.to_string(),
            ));
            info!("Using artist/album folder structure for downloads");
        }

        let installed_replacer = settings.replace_spaces;
        if installed_replacer {
            settings.space_replacer = Some(space_replacer());
            info!("Replacing spaces with hyphens in filenames");
        }

        Self {
            settings,
            original_output,
            installed_replacer,
        }
    }
}

impl Deref for SessionOverrides<'_> {
    type Target = Settings;

    fn deref(&self) -> &Settings {
        self.settings
    }
}

impl Drop for SessionOverrides<'_> {
    fn drop(&mut self) {
        if let Some(output) = self.original_output.take() {
            self.settings.output = output;
        }
        if self.installed_replacer {
            self.settings.space_replacer = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(structured: bool, replace_spaces: bool) -> Settings {
        Settings {
            structured,
            replace_spaces,
            output: "{title} by {artist}".to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_no_overrides_when_disabled() {
        let mut s = settings(false, false);
        {
            let guard = SessionOverrides::apply(&mut s);
            assert_eq!(guard.output, "{title} by {artist}");
            assert!(guard.space_replacer.is_none());
        }
        assert_eq!(s.output, "{title} by {artist}");
    }

    #[test]
    fn test_overrides_applied_then_reverted() {
        let mut s = settings(true, true);
        {
            let guard = SessionOverrides::apply(&mut s);
            assert_eq!(guard.output, STRUCTURED_TEMPLATE);
            let replacer = guard.space_replacer.expect("replacer installed");
            assert_eq!(replacer.apply("a b/c d"), "a b/c-d");
        }
        assert_eq!(s.output, "{title} by {artist}");
        assert!(s.space_replacer.is_none());
    }

    #[test]
    fn test_reverted_on_panic() {
        let mut s = settings(true, true);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = SessionOverrides::apply(&mut s);
            panic!("collaborator blew up");
        }));
        assert!(result.is_err());
        assert_eq!(s.output, "{title} by {artist}");
        assert!(s.space_replacer.is_none());
    }
}
