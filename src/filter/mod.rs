//! The allowlist filter.
//!
//! An [`AccessFilter`] answers one question: may this reference touch the
//! local filesystem? References in the `file` scheme (or with no scheme at
//! all) are admitted only when their normalized path lies under one of the
//! configured [`AllowedPrefix`]es. Every other scheme passes through.
//!
//! ```rust,ignore
//! use locator_guard::AccessFilter;
//!
//! let filter = AccessFilter::build(["/application/xsl", "/application/docs"])?;
//!
//! assert!(filter.check("/application/xsl/id.xsl"));
//! assert!(!filter.check("/application/xsl/../config/secret"));
//! assert!(filter.check_with_base("../docs/brother.xml", "/application/xsl/id.xsl"));
//! ```
//!
//! Anything the filter cannot classify with confidence is denied.

mod prefix;

pub use prefix::AllowedPrefix;

use crate::bootstrap::{ENV_VAR, PROPERTY};
use crate::environment::{Environment, SystemEnvironment};
use crate::error::ConfigError;
use crate::locator::{collapse_slashes, Locator, FILE_SCHEME};
use std::fmt;

/// A reference presented to the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference<'a> {
    /// A locator to check as is. A relative file reference is denied.
    Absolute(&'a str),
    /// A possibly relative reference, resolved against `base` first.
    RelativeWithBase {
        /// The reference as written in the document.
        reference: &'a str,
        /// The locator the reference is relative to.
        base: &'a str,
    },
}

impl fmt::Display for Reference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(locator) => f.write_str(locator),
            Self::RelativeWithBase { reference, base } => {
                write!(f, "{} (relative to {})", reference, base)
            }
        }
    }
}

/// The outcome of a check, with the reason behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Admitted: the scheme is not `file`, so the filter does not govern it.
    PassThrough {
        /// The scheme that was passed through.
        scheme: String,
    },
    /// Admitted: the path lies under an allowed prefix.
    Allowed {
        /// The first prefix that matched.
        prefix: AllowedPrefix,
    },
    /// Denied: the input could not be parsed, resolved, or decoded safely.
    Malformed {
        /// What went wrong.
        reason: String,
    },
    /// Denied: a file reference with a relative (or missing) path.
    Relative,
    /// Denied: a file reference naming a host other than the local one.
    RemoteHost {
        /// The authority given in the reference.
        host: String,
    },
    /// Denied: the path lies outside every allowed prefix.
    OutsideAllowed {
        /// The decoded, normalized path that was compared.
        path: String,
    },
}

impl Decision {
    /// Returns true if the reference may be accessed.
    #[must_use]
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::PassThrough { .. } | Self::Allowed { .. })
    }

    fn malformed(reason: impl fmt::Display) -> Self {
        Self::Malformed {
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PassThrough { scheme } => {
                write!(f, "admitted: scheme '{}' is not governed by the filter", scheme)
            }
            Self::Allowed { prefix } => write!(f, "admitted: under allowed location '{}'", prefix),
            Self::Malformed { reason } => write!(f, "denied: malformed reference: {}", reason),
            Self::Relative => write!(f, "denied: relative file reference"),
            Self::RemoteHost { host } => write!(f, "denied: file reference names host '{}'", host),
            Self::OutsideAllowed { path } => {
                write!(f, "denied: '{}' is outside all allowed locations", path)
            }
        }
    }
}

/// Immutable allowlist of filesystem locations.
///
/// Built once, then shared freely: checks take `&self`, perform no I/O, and
/// have no side effects beyond debug-level tracing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessFilter {
    allowed: Vec<AllowedPrefix>,
}

impl AccessFilter {
    /// Builds a filter from raw OS paths, using the real process environment
    /// for `~` expansion and relative paths.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` encountered; see [`Self::build_in`].
    pub fn build<I, S>(locations: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build_in(&SystemEnvironment::new(), locations)
    }

    /// Builds a filter from raw OS paths.
    ///
    /// Each entry is normalized in order by [`AllowedPrefix::from_location`].
    /// An empty list is valid and yields a filter that denies every file
    /// reference; a warning is logged because that is rarely intended.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any entry is empty, written as a `file:` URI,
    /// or cannot be made absolute. No partial filter is produced.
    pub fn build_in<I, S>(env: &dyn Environment, locations: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = locations
            .into_iter()
            .enumerate()
            .map(|(index, location)| {
                let location = location.as_ref();
                AllowedPrefix::from_location(index, location, env).inspect_err(|e| {
                    tracing::error!(index, location, error = %e, "Rejected allowed location");
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if allowed.is_empty() {
            notify_empty();
        }
        for prefix in &allowed {
            tracing::debug!(prefix = %prefix, "Added allowed location");
        }

        Ok(Self { allowed })
    }

    /// Creates a filter with no allowed locations.
    ///
    /// Every file reference is denied; other schemes still pass through.
    #[must_use]
    pub fn deny_all() -> Self {
        notify_empty();
        Self {
            allowed: Vec::new(),
        }
    }

    /// Returns the canonical allowed prefixes, in configuration order.
    #[must_use]
    pub fn allowed_prefixes(&self) -> &[AllowedPrefix] {
        &self.allowed
    }

    /// Returns true if no location is allowed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Checks a locator that is expected to be absolute.
    ///
    /// A locator without a scheme is treated as a `file` locator. Relative
    /// file locators are always denied.
    #[must_use]
    pub fn check(&self, locator: &str) -> bool {
        self.admits(&Reference::Absolute(locator))
    }

    /// Checks `reference` after resolving it against `base`.
    ///
    /// Empty or unparseable input in either position is denied.
    #[must_use]
    pub fn check_with_base(&self, reference: &str, base: &str) -> bool {
        self.admits(&Reference::RelativeWithBase { reference, base })
    }

    /// Checks an already parsed locator.
    #[must_use]
    pub fn check_locator(&self, locator: &Locator) -> bool {
        self.decide(locator.clone()).is_admitted()
    }

    /// Returns true if the reference may be accessed.
    #[must_use]
    pub fn admits(&self, reference: &Reference<'_>) -> bool {
        let decision = self.explain(reference);
        tracing::trace!(%reference, %decision, "Checked reference");
        decision.is_admitted()
    }

    /// Decides on a reference and reports why.
    #[must_use]
    pub fn explain(&self, reference: &Reference<'_>) -> Decision {
        match *reference {
            Reference::Absolute(locator) => match Locator::parse(locator) {
                Ok(locator) => self.decide(locator),
                Err(e) => Decision::malformed(e),
            },
            Reference::RelativeWithBase { reference, base } => {
                if reference.is_empty() || base.is_empty() {
                    return Decision::malformed("empty reference or base");
                }
                let resolved = Locator::parse(base).and_then(|base| {
                    let reference = file_view(Locator::parse(reference)?);
                    file_view(base.with_default_scheme(FILE_SCHEME)).resolve(&reference)
                });
                match resolved {
                    Ok(locator) => self.decide(locator),
                    Err(e) => Decision::malformed(e),
                }
            }
        }
    }

    fn decide(&self, locator: Locator) -> Decision {
        let locator = locator.with_default_scheme(FILE_SCHEME);
        if !locator.is_file() {
            return Decision::PassThrough {
                scheme: locator.scheme().unwrap_or_default().to_string(),
            };
        }

        if let Some(host) = locator.authority() {
            if !host.is_empty() && !host.eq_ignore_ascii_case("localhost") {
                return Decision::RemoteHost {
                    host: host.to_string(),
                };
            }
        }

        // Judged before normalization: dot removal may turn `a/..//x` into `//x`.
        if !locator.has_absolute_path() {
            return Decision::Relative;
        }

        let path = match locator.with_collapsed_slashes().normalized().decoded_path() {
            Ok(path) => path,
            Err(e) => return Decision::malformed(e),
        };
        if path.contains('\0') {
            return Decision::malformed("decoded path contains NUL");
        }
        if path.split('/').any(|segment| segment == "." || segment == "..") {
            return Decision::malformed("decoded path contains an encoded dot segment");
        }
        let path = collapse_slashes(&path);

        match self.allowed.iter().find(|prefix| prefix.contains(&path)) {
            Some(prefix) => Decision::Allowed {
                prefix: prefix.clone(),
            },
            None => Decision::OutsideAllowed { path },
        }
    }
}

/// Collapses redundant slashes in locators whose path names a file.
fn file_view(locator: Locator) -> Locator {
    if locator.has_scheme() && !locator.is_file() {
        locator
    } else {
        locator.with_collapsed_slashes()
    }
}

fn notify_empty() {
    tracing::warn!(
        property = PROPERTY,
        env_var = ENV_VAR,
        "No allowed file system locations configured for the filesystem filter. \
         Set the '{}' environment variable or the '{}' property in order to add \
         allowed paths, e.g. '-D {}=~/xsl,~/docs'",
        ENV_VAR,
        PROPERTY,
        PROPERTY
    );
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::environment::FixedEnvironment;
    use crate::error::ConfigErrorKind;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    fn env() -> FixedEnvironment {
        FixedEnvironment::new()
            .with_home_dir("/home/alice")
            .with_current_dir("/work")
    }

    fn filter(locations: &[&str]) -> AccessFilter {
        AccessFilter::build_in(&env(), locations).unwrap()
    }

    fn application() -> AccessFilter {
        filter(&["/application/xsl", "/application/docs"])
    }

    #[test]
    fn build_produces_one_prefix_per_location() {
        let filter = filter(&["/application/xsl", "/application/docs", "/application/dir/"]);
        let prefixes: Vec<&str> = filter
            .allowed_prefixes()
            .iter()
            .map(AllowedPrefix::as_str)
            .collect();
        assert_eq!(
            prefixes,
            vec!["/application/xsl/", "/application/docs/", "/application/dir/"]
        );
    }

    #[test]
    fn build_with_home_and_relative_locations() {
        let filter = filter(&["~/xsl", "xsl"]);
        assert_eq!(filter.allowed_prefixes()[0].as_str(), "/home/alice/xsl/");
        assert_eq!(filter.allowed_prefixes()[1].as_str(), "/work/xsl/");
    }

    #[test]
    fn build_rejects_empty_entry() {
        let err = AccessFilter::build_in(&env(), ["/ok", ""]).unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::EmptyLocation { index: 1 });
    }

    #[test]
    fn build_rejects_file_uri_entry() {
        let err = AccessFilter::build_in(&env(), ["file:/x"]).unwrap_err();
        assert!(matches!(err.kind, ConfigErrorKind::FileSchemeLocation { index: 0, .. }));
    }

    #[test]
    fn build_with_no_locations_denies_all_files() {
        let filter = AccessFilter::build_in(&env(), Vec::<String>::new()).unwrap();
        assert!(filter.is_empty());
        assert!(!filter.check("/application/xsl/id.xsl"));
        assert!(filter.check("https://example.com/id.xsl"));
    }

    #[test]
    fn deny_all_matches_empty_build() {
        let built = AccessFilter::build_in(&env(), Vec::<String>::new()).unwrap();
        assert_eq!(AccessFilter::deny_all(), built);
    }

    #[test]
    fn admits_paths_under_allowed_locations() {
        let filter = application();
        assert!(filter.check("/application/xsl/id.xsl"));
        assert!(filter.check("/application/xsl/lib/i18n.xsl"));
        assert!(filter.check("/application/docs/hello.xml"));
        assert!(!filter.check("/application/config/secret"));
    }

    #[test]
    fn admits_file_uris_under_allowed_locations() {
        let filter = application();
        assert!(filter.check("file:/application/xsl/id.xsl"));
        assert!(filter.check("file:///application/xsl/id.xsl"));
        assert!(filter.check("file://localhost/application/xsl/id.xsl"));
        assert!(filter.check("FILE:/application/xsl/id.xsl"));
        assert!(!filter.check("file:///application/config/secret"));
    }

    #[test]
    fn normalization_closes_traversal() {
        let filter = application();
        assert!(!filter.check("/application/xsl/../config/secret"));
        assert!(!filter.check("/application/xsl/../../etc/passwd"));
        assert!(filter.check("/etc/../application/xsl/id.xsl"));
        assert!(filter.check("/application/./xsl/./id.xsl"));
    }

    #[test]
    fn empty_segments_do_not_absorb_parent_steps() {
        let filter = application();
        for reference in [
            "/application/xsl//../config/secret",
            "file:///application/xsl//../config/secret",
            "/application/xsl/.//../config/secret",
            "/application/xsl///../config/secret",
            "/application/xsl/lib//../../config/secret",
        ] {
            assert!(!filter.check(reference), "{reference} should be denied");
        }
        assert_eq!(
            filter.explain(&Reference::Absolute("/application/xsl//../config/secret")),
            Decision::OutsideAllowed {
                path: "/application/config/secret".to_string()
            }
        );
    }

    #[test]
    fn empty_segments_in_relative_references_are_collapsed() {
        let filter = application();
        let base = "/application/xsl/id.xsl";
        assert!(!filter.check_with_base("sub//../../config/secret", base));
        assert!(!filter.check_with_base(".//../config/secret", base));
        assert!(!filter.check_with_base("..//config/secret", base));
        assert!(!filter.check_with_base("../config/secret", "/application/xsl//id.xsl"));
        assert!(!filter.check_with_base("../config/secret", "file:///application/xsl//id.xsl"));
        assert!(filter.check_with_base("lib//i18n.xsl", base));
    }

    #[test]
    fn redundant_slashes_collapse_into_allowed_directory() {
        let filter = application();
        assert_eq!(
            filter.explain(&Reference::Absolute("/application//xsl/id.xsl")),
            Decision::Allowed {
                prefix: filter.allowed_prefixes()[0].clone()
            }
        );
        assert!(filter.check("file:////application/docs//hello.xml"));
        assert!(filter.check("/application%2F/xsl/id.xsl"));
        assert!(!filter.check("/application//config/secret"));
    }

    #[test]
    fn prefix_boundary_is_separator_exact() {
        let filter = filter(&["/application/xsl"]);
        assert!(!filter.check("/application/xslt/id.xsl"));
        assert!(!filter.check("/application/xsl-secret/id.xsl"));
        assert!(!filter.check("/application/xsl"));
        assert!(filter.check("/application/xsl/"));
    }

    #[test]
    fn relative_references_are_denied() {
        let filter = filter(&["/"]);
        for reference in [
            "xsl/id.xsl",
            "./xsl/id.xsl",
            "../xsl/id.xsl",
            "...../xsl/id.xsl",
            "file:xsl/id.xsl",
            "",
            "C:/application/xsl/id.xsl",
        ] {
            assert_eq!(
                filter.explain(&Reference::Absolute(reference)),
                Decision::Relative,
                "{reference} should be denied as relative"
            );
        }
    }

    #[test]
    fn relative_path_is_not_normalized_into_absolute() {
        let filter = filter(&["/"]);
        assert!(!filter.check("a/..//etc/passwd"));
    }

    #[test]
    fn root_location_admits_every_absolute_file() {
        let filter = filter(&["/"]);
        assert!(filter.check("file:/etc/passwd"));
        assert!(filter.check("/etc/passwd"));
    }

    #[test]
    fn other_schemes_pass_through() {
        let filter = application();
        assert!(filter.check("http://example.com/application/xsl/../config/secret"));
        assert!(filter.check("https://example.com/etc/passwd"));
        assert!(filter.check("urn:isbn:0451450523"));
        assert_eq!(
            filter.explain(&Reference::Absolute("ftp://example.com/x")),
            Decision::PassThrough {
                scheme: "ftp".to_string()
            }
        );
    }

    #[test]
    fn remote_file_hosts_are_denied() {
        let filter = filter(&["/"]);
        assert_eq!(
            filter.explain(&Reference::Absolute("file://fileserver/share/x")),
            Decision::RemoteHost {
                host: "fileserver".to_string()
            }
        );
        assert!(!filter.check("//fileserver/share/x"));
    }

    #[test]
    fn comparison_uses_decoded_path() {
        let filter = filter(&["/application/my docs"]);
        assert!(filter.check("/application/my%20docs/hello.xml"));
        assert!(filter.check("file:///application/my%20docs/hello.xml"));
        assert!(!filter.check("/application/my docs/hello.xml"));
    }

    #[test]
    fn encoded_dot_segments_are_denied() {
        let filter = application();
        for reference in [
            "/application/xsl/%2e%2e/config/secret",
            "/application/xsl/%2E%2E/config/secret",
            "/application/xsl/.%2e/config/secret",
            "/application/xsl/%2e/id.xsl",
        ] {
            assert!(
                matches!(
                    filter.explain(&Reference::Absolute(reference)),
                    Decision::Malformed { .. }
                ),
                "{reference} should be denied"
            );
        }
    }

    #[test]
    fn encoded_separator_is_compared_decoded() {
        let filter = application();
        assert!(filter.check("/application%2Fxsl/id.xsl"));
        assert!(!filter.check("/application%2Fconfig/secret"));
    }

    #[test]
    fn encoded_nul_and_invalid_utf8_are_denied() {
        let filter = filter(&["/"]);
        assert!(!filter.check("/application/xsl/id.xsl%00.txt"));
        assert!(!filter.check("/application/%FF"));
    }

    #[test]
    fn malformed_locators_are_denied() {
        let filter = filter(&["/"]);
        assert!(!filter.check("/application/bad path"));
        assert!(!filter.check("/application/%zz"));
        assert!(!filter.check("/application\\..\\etc"));
    }

    #[test]
    fn query_and_fragment_do_not_affect_file_comparison() {
        let filter = application();
        assert!(filter.check("file:///application/xsl/id.xsl?x=1#frag"));
        assert!(!filter.check("file:///application/config/secret#/application/xsl/"));
    }

    #[test]
    fn check_with_base_resolves_relative_references() {
        let filter = application();
        let base = "/application/xsl/id.xsl";
        assert!(filter.check_with_base("../docs/brother.xml", base));
        assert!(filter.check_with_base("lib/i18n.xsl", base));
        assert!(!filter.check_with_base("../other/secret", base));
        assert!(!filter.check_with_base("../../etc/passwd", base));
    }

    #[test]
    fn check_with_base_accepts_uri_bases() {
        let filter = application();
        assert!(filter.check_with_base("../docs/brother.xml", "file:///application/xsl/id.xsl"));
        assert!(!filter.check_with_base("../config/x", "file:///application/xsl/id.xsl"));
    }

    #[test]
    fn check_with_base_absolute_reference_replaces_base() {
        let filter = application();
        let base = "/application/xsl/id.xsl";
        assert!(!filter.check_with_base("/etc/passwd", base));
        assert!(!filter.check_with_base("file:///etc/passwd", base));
        assert!(filter.check_with_base("/application/docs/a.xml", "/tmp/x.xsl"));
        assert!(filter.check_with_base("http://example.com/x", base));
    }

    #[test]
    fn check_with_base_non_file_base_passes_through() {
        let filter = application();
        assert!(filter.check_with_base("../../etc/passwd", "http://example.com/a/b.xsl"));
    }

    #[test]
    fn check_with_base_denies_empty_and_unresolvable_input() {
        let filter = filter(&["/"]);
        assert!(!filter.check_with_base("", ""));
        assert!(!filter.check_with_base("", "/application/xsl/id.xsl"));
        assert!(!filter.check_with_base("id.xsl", ""));
        assert!(!filter.check_with_base("id.xsl", "xsl/base.xsl"));
        assert!(!filter.check_with_base("id.xsl", "urn:isbn:0451450523"));
        assert!(!filter.check_with_base("bad path", "/application/xsl/id.xsl"));
        assert!(!filter.check_with_base("id.xsl", "/bad base/x"));
    }

    #[test]
    fn check_locator_matches_check() {
        let filter = application();
        let locator = Locator::parse("/application/docs/hello.xml").unwrap();
        assert!(filter.check_locator(&locator));
        let locator = Locator::parse("/application/config/secret").unwrap();
        assert!(!filter.check_locator(&locator));
    }

    #[test]
    fn explain_names_matching_prefix() {
        let filter = application();
        let decision = filter.explain(&Reference::Absolute("/application/docs/hello.xml"));
        assert_eq!(decision.to_string(), "admitted: under allowed location '/application/docs/'");
    }

    #[test]
    fn explain_reports_outside_path() {
        let filter = application();
        let decision = filter.explain(&Reference::Absolute("/application/xsl/../config/secret"));
        assert_eq!(
            decision,
            Decision::OutsideAllowed {
                path: "/application/config/secret".to_string()
            }
        );
        assert!(!decision.is_admitted());
    }

    #[test]
    fn checks_are_repeatable() {
        let filter = application();
        for _ in 0..3 {
            assert!(filter.check("/application/xsl/id.xsl"));
            assert!(!filter.check("/application/config/secret"));
            assert!(filter.check_with_base("../docs/brother.xml", "/application/xsl/id.xsl"));
        }
        assert_eq!(filter, application());
    }

    #[test]
    fn sibling_names_never_match() {
        let filter = filter(&["/application/xsl"]);
        let suffixes = [
            "t", "-secret", ".bak", "_", "~", "0", " ", "%20", "\u{00e9}", "\u{0301}", "\u{200b}",
            "\u{2215}", "\u{ff0f}", "\u{2044}", "\u{0131}",
        ];
        for suffix in suffixes {
            let sibling = format!("/application/xsl{suffix}/id.xsl");
            assert!(!filter.check(&sibling), "{sibling:?} must be denied");

            let encoded: String = sibling
                .bytes()
                .map(|b| {
                    if b.is_ascii_alphanumeric() || b == b'/' || b == b'.' {
                        (b as char).to_string()
                    } else {
                        format!("%{b:02X}")
                    }
                })
                .collect();
            assert!(!filter.check(&encoded), "{encoded:?} must be denied");
        }
    }

    #[test]
    fn unicode_look_alike_directory_is_distinct() {
        // Cyrillic small letter es (U+0441) in place of Latin 'c'
        let filter = filter(&["/application/xsl"]);
        assert!(!filter.check("/appli\u{0441}ation/xsl/id.xsl"));

        let filter = AccessFilter::build_in(&env(), ["/appli\u{0441}ation/xsl"]).unwrap();
        assert!(!filter.check("/application/xsl/id.xsl"));
        assert!(filter.check("/appli\u{0441}ation/xsl/id.xsl"));
    }

    /// Buffer that a fmt subscriber writes formatted events into.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture_logs(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn empty_build_logs_a_warning() {
        let logs = capture_logs(|| {
            let filter = AccessFilter::build_in(&env(), Vec::<String>::new()).unwrap();
            assert!(filter.is_empty());
        });
        let warning = logs
            .lines()
            .find(|line| line.contains("WARN"))
            .expect("a warning should be logged");
        assert!(warning.contains(ENV_VAR), "{warning}");
        assert!(warning.contains(PROPERTY), "{warning}");
    }

    #[test]
    fn non_empty_build_logs_no_warning() {
        let logs = capture_logs(|| {
            filter(&["/application/xsl"]);
        });
        assert!(!logs.contains("WARN"), "{logs}");
        assert!(logs.contains("/application/xsl/"), "{logs}");
    }

    #[test]
    fn rejected_entry_logs_an_error() {
        let logs = capture_logs(|| {
            assert!(AccessFilter::build_in(&env(), [""]).is_err());
        });
        let error = logs
            .lines()
            .find(|line| line.contains("ERROR"))
            .expect("an error should be logged");
        assert!(error.contains("Rejected allowed location"), "{error}");
        assert!(!logs.contains("WARN"), "{logs}");
    }

    #[test]
    fn filter_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AccessFilter>();
    }
}
