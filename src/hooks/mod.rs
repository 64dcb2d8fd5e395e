//! Policies controlling how captured frames are rendered.
//!
//! # Quick Start
//!
//! ```rust
//! use stackcause::hooks::{
//!     FramePolicy,
//!     frame_filter::{AllowFrame, SkipRustSrc},
//!     name_formatter::ShortFunctionName,
//! };
//!
//! // Hide standard library frames and shorten function names, process-wide.
//! FramePolicy::new()
//!     .filter(SkipRustSrc(AllowFrame))
//!     .name_formatter(ShortFunctionName)
//!     .install();
//! ```
//!
//! # Process-wide or explicit
//!
//! A [`FramePolicy`] combines one [`FrameFilter`] with an optional
//! [`FrameNameFormatter`]. There are two ways of using one:
//!
//! - Install it process-wide with [`FramePolicy::install`], or replace one
//!   half with [`set_skip_frame`] / [`set_frame_name_processor`]. The
//!   installed policy is used by `{:#}` and `{:?}` on every error type in this
//!   crate.
//! - Pass it explicitly to
//!   [`StackError::display_with`](crate::StackError::display_with) or
//!   [`ErrorAggregate::display_with`](crate::ErrorAggregate::display_with).
//!   Nothing global is read in that case.
//!
//! Replacing the process-wide policy is memory safe at any time, but it is
//! meant to happen once during startup: a render racing a replacement may use
//! either policy.
//!
//! When nothing has been installed, the policy is read from the environment
//! once (see [`FramePolicy::from_env`]).

pub mod frame_filter;
pub mod name_formatter;

use std::{borrow::Cow, fmt, sync::Arc, sync::OnceLock};

use self::{
    frame_filter::{AllowFrame, FrameFilter, SkipRustSrc},
    name_formatter::{
        FrameNameFormatter, NoDomainFunctionName, OnlyFunctionName, ShortFunctionName,
    },
};

/// Environment variable holding a comma separated list of frame options.
///
/// Recognized options are `skip_std`, `short`, `only_function` and
/// `no_domain`. Unknown options are ignored.
pub const FRAMES_ENV_VAR: &str = "STACKCAUSE_FRAMES";

static POLICY: PolicySlot = PolicySlot::new();

/// The installed process-wide policy. Empty means "read the environment".
struct PolicySlot(spin::RwLock<Option<FramePolicy>>);

impl PolicySlot {
    const fn new() -> Self {
        Self(spin::RwLock::new(None))
    }

    /// Clones the installed policy out, so no lock is held while rendering.
    fn current(&self) -> FramePolicy {
        match self.0.read().as_ref() {
            Some(policy) => policy.clone(),
            None => FramePolicy::from_env(),
        }
    }

    fn replace(&self, policy: FramePolicy) -> Option<FramePolicy> {
        self.0.write().replace(policy)
    }

    /// Rebuilds the policy from the installed one (or the environment) under
    /// a single write lock.
    fn update(&self, change: impl FnOnce(FramePolicy) -> FramePolicy) {
        let mut slot = self.0.write();
        let policy = change(slot.take().unwrap_or_else(FramePolicy::from_env));

        #[cfg(feature = "tracing")]
        tracing::debug!(policy = ?policy, "updating frame policy");

        *slot = Some(policy);
    }

    fn take(&self) -> Option<FramePolicy> {
        self.0.write().take()
    }
}

/// A frame filter paired with an optional name formatter.
///
/// Cloning a policy is cheap: the filter and formatter are shared.
///
/// # Examples
///
/// ```
/// use stackcause::{StackError, hooks::FramePolicy};
///
/// let hide_everything = FramePolicy::new().filter(|_: &str, _: &str| true);
/// let error = StackError::new("disk full");
/// assert_eq!(error.display_with(&hide_everything).to_string(), "disk full");
/// ```
#[derive(Clone)]
pub struct FramePolicy {
    filter: Arc<dyn FrameFilter>,
    name_formatter: Option<Arc<dyn FrameNameFormatter>>,
}

impl FramePolicy {
    /// Creates a policy that renders every frame with its full name.
    #[must_use]
    pub fn new() -> Self {
        Self {
            filter: Arc::new(AllowFrame),
            name_formatter: None,
        }
    }

    /// Replaces the frame filter.
    #[must_use]
    pub fn filter<F: FrameFilter>(mut self, filter: F) -> Self {
        self.filter = Arc::new(filter);
        self
    }

    /// Sets the name formatter.
    #[must_use]
    pub fn name_formatter<N: FrameNameFormatter>(mut self, formatter: N) -> Self {
        self.name_formatter = Some(Arc::new(formatter));
        self
    }

    /// Removes the name formatter, so function names are rendered in full.
    #[must_use]
    pub fn without_name_formatter(mut self) -> Self {
        self.name_formatter = None;
        self
    }

    /// Builds a policy from the process environment.
    ///
    /// - `RUST_BACKTRACE=full` renders every frame with its full name,
    ///   regardless of anything else.
    /// - Otherwise [`STACKCAUSE_FRAMES`](FRAMES_ENV_VAR) is consulted: a
    ///   comma separated list where `skip_std` installs
    ///   [`SkipRustSrc`], and `short`, `only_function` or `no_domain` select
    ///   the matching name formatter (the last one listed wins).
    ///
    /// The environment is read once per process.
    #[must_use]
    pub fn from_env() -> Self {
        EnvOptions::get().to_policy()
    }

    /// Returns a copy of the process-wide policy.
    ///
    /// If none has been installed, this is [`FramePolicy::from_env`].
    #[must_use]
    pub fn current() -> Self {
        POLICY.current()
    }

    /// Installs this policy process-wide, returning the one it replaces.
    ///
    /// The returned policy is `None` if no policy had been installed yet.
    pub fn install(self) -> Option<Self> {
        #[cfg(feature = "tracing")]
        tracing::debug!(policy = ?self, "installing frame policy");

        POLICY.replace(self)
    }

    /// Returns `true` if the frame should be left out of a rendering.
    #[must_use]
    pub fn should_skip(&self, function: &str, file: &str) -> bool {
        self.filter.should_skip(function, file)
    }

    /// Returns the name to render for `function`.
    #[must_use]
    pub fn format_name<'a>(&self, function: &'a str) -> Cow<'a, str> {
        match &self.name_formatter {
            Some(formatter) => formatter.format(function),
            None => Cow::Borrowed(function),
        }
    }
}

impl Default for FramePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FramePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FramePolicy")
            .field("filter", &"<dyn FrameFilter>")
            .field(
                "name_formatter",
                &self.name_formatter.as_ref().map(|_| "<dyn FrameNameFormatter>"),
            )
            .finish()
    }
}

/// Replaces the frame filter of the process-wide policy, keeping its name
/// formatter.
///
/// # Examples
///
/// ```
/// use stackcause::hooks::{
///     frame_filter::{AllowFrame, SkipRustSrc},
///     set_skip_frame,
/// };
///
/// set_skip_frame(SkipRustSrc(AllowFrame));
/// ```
pub fn set_skip_frame<F: FrameFilter>(filter: F) {
    POLICY.update(|policy| policy.filter(filter));
}

/// Replaces the name formatter of the process-wide policy, keeping its frame
/// filter.
///
/// # Examples
///
/// ```
/// use stackcause::hooks::{name_formatter::OnlyFunctionName, set_frame_name_processor};
///
/// set_frame_name_processor(OnlyFunctionName);
/// ```
pub fn set_frame_name_processor<N: FrameNameFormatter>(formatter: N) {
    POLICY.update(|policy| policy.name_formatter(formatter));
}

/// Removes the process-wide policy, falling back to
/// [`FramePolicy::from_env`].
///
/// Returns the policy that was installed, if any.
pub fn reset_frame_policy() -> Option<FramePolicy> {
    #[cfg(feature = "tracing")]
    tracing::debug!("resetting frame policy");

    POLICY.take()
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum NameOption {
    #[default]
    Full,
    Short,
    OnlyFunction,
    NoDomain,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct EnvOptions {
    skip_std: bool,
    names: NameOption,
}

impl EnvOptions {
    fn get() -> Self {
        static FRAME_OPTIONS: OnceLock<EnvOptions> = OnceLock::new();

        *FRAME_OPTIONS.get_or_init(|| {
            let full = std::env::var("RUST_BACKTRACE").is_ok_and(|value| value == "full");
            let options = std::env::var(FRAMES_ENV_VAR).ok();
            Self::parse(full, options.as_deref())
        })
    }

    fn parse(full: bool, options: Option<&str>) -> Self {
        let mut parsed = Self::default();
        if full {
            return parsed;
        }

        for option in options.unwrap_or_default().split(',') {
            match option.trim() {
                "skip_std" => parsed.skip_std = true,
                "short" => parsed.names = NameOption::Short,
                "only_function" => parsed.names = NameOption::OnlyFunction,
                "no_domain" => parsed.names = NameOption::NoDomain,
                _ => {}
            }
        }

        parsed
    }

    fn to_policy(self) -> FramePolicy {
        let policy = if self.skip_std {
            FramePolicy::new().filter(SkipRustSrc(AllowFrame))
        } else {
            FramePolicy::new()
        };

        match self.names {
            NameOption::Full => policy,
            NameOption::Short => policy.name_formatter(ShortFunctionName),
            NameOption::OnlyFunction => policy.name_formatter(OnlyFunctionName),
            NameOption::NoDomain => policy.name_formatter(NoDomainFunctionName),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STD_FILE: &str = "/rustc/17067e9ac6d7e98f18d4a2d0ee5d9e2bb7ca3e1c/library/std/src/rt.rs";

    static_assertions::assert_impl_all!(FramePolicy: Send, Sync, Clone, Default);

    #[test]
    fn test_default_policy_is_identity() {
        let policy = FramePolicy::default();
        assert!(!policy.should_skip("std::rt::lang_start", STD_FILE));
        assert!(matches!(
            policy.format_name("my_app::config::load"),
            Cow::Borrowed("my_app::config::load")
        ));
    }

    #[test]
    fn test_builder() {
        let policy = FramePolicy::new()
            .filter(SkipRustSrc(AllowFrame))
            .name_formatter(OnlyFunctionName);
        assert!(policy.should_skip("std::rt::lang_start", STD_FILE));
        assert!(!policy.should_skip("my_app::main", "src/main.rs"));
        assert_eq!(policy.format_name("my_app::config::load"), "load");

        let policy = policy.without_name_formatter();
        assert_eq!(
            policy.format_name("my_app::config::load"),
            "my_app::config::load"
        );
        assert!(policy.should_skip("std::rt::lang_start", STD_FILE));
    }

    #[test]
    fn test_clones_share_filter() {
        let policy = FramePolicy::new().filter(|function: &str, _: &str| function == "skip");
        let clone = policy.clone();
        assert!(Arc::ptr_eq(&policy.filter, &clone.filter));
        assert!(clone.should_skip("skip", ""));
    }

    #[test]
    fn test_env_parse() {
        assert_eq!(EnvOptions::parse(false, None), EnvOptions::default());
        assert_eq!(
            EnvOptions::parse(false, Some("skip_std, short")),
            EnvOptions {
                skip_std: true,
                names: NameOption::Short,
            }
        );
        assert_eq!(
            EnvOptions::parse(false, Some("short,bogus,no_domain")),
            EnvOptions {
                skip_std: false,
                names: NameOption::NoDomain,
            }
        );
        assert_eq!(
            EnvOptions::parse(true, Some("skip_std,only_function")),
            EnvOptions::default()
        );
    }

    #[test]
    fn test_env_policy() {
        let policy = EnvOptions {
            skip_std: true,
            names: NameOption::OnlyFunction,
        }
        .to_policy();
        assert!(policy.should_skip("std::rt::lang_start", STD_FILE));
        assert_eq!(policy.format_name("my_app::config::load"), "load");

        let policy = EnvOptions::default().to_policy();
        assert!(!policy.should_skip("std::rt::lang_start", STD_FILE));
        assert_eq!(
            policy.format_name("my_app::config::load"),
            "my_app::config::load"
        );
    }

    #[test]
    fn test_policy_slot() {
        let slot = PolicySlot::new();
        assert!(slot.take().is_none());

        slot.update(|policy| policy.name_formatter(OnlyFunctionName));
        assert_eq!(slot.current().format_name("my_app::config::load"), "load");

        slot.update(|policy| policy.filter(SkipRustSrc(AllowFrame)));
        let current = slot.current();
        assert_eq!(current.format_name("my_app::config::load"), "load");
        assert!(current.should_skip("std::rt::lang_start", STD_FILE));

        assert!(slot.replace(FramePolicy::new()).is_some());
        assert_eq!(
            slot.current().format_name("my_app::config::load"),
            "my_app::config::load"
        );

        assert!(slot.take().is_some());
        assert!(slot.take().is_none());
    }

    #[test]
    fn test_debug() {
        let policy = FramePolicy::new().name_formatter(ShortFunctionName);
        let debug = format!("{policy:?}");
        assert!(debug.starts_with("FramePolicy"));
        assert!(debug.contains("FrameNameFormatter"));
    }
}
