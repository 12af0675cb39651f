//! Phased registration loading.
//!
//! A service registers its components in three phases that always run in the
//! same order:
//!
//! 1. child libraries,
//! 2. manual registrations,
//! 3. the service's own registrations.
//!
//! The first failing phase aborts the load. Phases that already ran are not
//! rolled back, so the registry may be partially populated after an error.

use std::fmt;

use trellis_core::ManagedError;

type Phase<R, C, E> = Box<dyn Fn(&mut R, &C) -> Result<(), E> + Send + Sync>;

/// One of the three loading phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadPhase {
    ChildLibraries,
    ManualRegistrations,
    Registrations,
}

impl LoadPhase {
    /// Phases in the order [`LoaderPhases::load`] runs them.
    pub const ORDER: [LoadPhase; 3] = [
        LoadPhase::ChildLibraries,
        LoadPhase::ManualRegistrations,
        LoadPhase::Registrations,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ChildLibraries => "load_child_libraries",
            Self::ManualRegistrations => "load_manual_registrations",
            Self::Registrations => "load_registrations",
        }
    }
}

impl fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A phase failed and the load was aborted.
#[derive(Debug, thiserror::Error)]
#[error("{phase} failed: {source}")]
pub struct LoadError<E>
where
    E: std::error::Error + 'static,
{
    pub phase: LoadPhase,
    #[source]
    pub source: E,
}

impl<E> LoadError<E>
where
    E: std::error::Error + 'static,
{
    pub fn into_source(self) -> E {
        self.source
    }
}

impl From<LoadError<ManagedError>> for ManagedError {
    fn from(err: LoadError<ManagedError>) -> Self {
        err.into_source()
    }
}

/// The three phase functions of a service loader.
///
/// `R` is the registry being populated, `C` the configuration handed to every
/// phase and `E` the error a phase may fail with. Unset phases are no-ops.
pub struct LoaderPhases<R, C, E> {
    child_libraries: Option<Phase<R, C, E>>,
    manual_registrations: Option<Phase<R, C, E>>,
    registrations: Option<Phase<R, C, E>>,
}

impl<R, C, E> LoaderPhases<R, C, E> {
    /// Creates a loader whose phases all do nothing.
    pub fn new() -> Self {
        Self {
            child_libraries: None,
            manual_registrations: None,
            registrations: None,
        }
    }

    /// Sets the phase that loads dependent libraries.
    #[must_use]
    pub fn with_child_libraries<F>(mut self, phase: F) -> Self
    where
        F: Fn(&mut R, &C) -> Result<(), E> + Send + Sync + 'static,
    {
        self.child_libraries = Some(Box::new(phase));
        self
    }

    /// Sets the phase for hand-written registrations.
    #[must_use]
    pub fn with_manual_registrations<F>(mut self, phase: F) -> Self
    where
        F: Fn(&mut R, &C) -> Result<(), E> + Send + Sync + 'static,
    {
        self.manual_registrations = Some(Box::new(phase));
        self
    }

    /// Sets the phase for the service's own registrations.
    #[must_use]
    pub fn with_registrations<F>(mut self, phase: F) -> Self
    where
        F: Fn(&mut R, &C) -> Result<(), E> + Send + Sync + 'static,
    {
        self.registrations = Some(Box::new(phase));
        self
    }

    /// Whether a function was supplied for `phase`.
    pub fn is_set(&self, phase: LoadPhase) -> bool {
        self.phase(phase).is_some()
    }

    fn phase(&self, phase: LoadPhase) -> Option<&Phase<R, C, E>> {
        match phase {
            LoadPhase::ChildLibraries => self.child_libraries.as_ref(),
            LoadPhase::ManualRegistrations => self.manual_registrations.as_ref(),
            LoadPhase::Registrations => self.registrations.as_ref(),
        }
    }
}

impl<R, C, E> LoaderPhases<R, C, E>
where
    E: std::error::Error + 'static,
{
    /// Runs every phase in [`LoadPhase::ORDER`].
    ///
    /// # Errors
    ///
    /// Returns the first phase failure. Later phases do not run.
    pub fn load(&self, registry: &mut R, config: &C) -> Result<(), LoadError<E>> {
        let span = tracing::info_span!("trellis_load");
        let _guard = span.enter();

        for phase in LoadPhase::ORDER {
            let Some(run) = self.phase(phase) else {
                tracing::debug!(%phase, "load phase not set, skipping");
                continue;
            };

            tracing::debug!(%phase, "load phase starting");
            run(registry, config).map_err(|source| {
                tracing::warn!(%phase, error = %source, "load phase failed, aborting load");
                LoadError { phase, source }
            })?;
            tracing::debug!(%phase, "load phase finished");
        }

        tracing::info!("registrations loaded");
        Ok(())
    }
}

impl<R, C, E> Default for LoaderPhases<R, C, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, C, E> fmt::Debug for LoaderPhases<R, C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderPhases")
            .field("child_libraries", &self.child_libraries.is_some())
            .field("manual_registrations", &self.manual_registrations.is_some())
            .field("registrations", &self.registrations.is_some())
            .finish()
    }
}

/// Runs `phases` against `registry`. Same as [`LoaderPhases::load`].
///
/// # Errors
///
/// Returns the first phase failure.
pub fn load<R, C, E>(
    phases: &LoaderPhases<R, C, E>,
    registry: &mut R,
    config: &C,
) -> Result<(), LoadError<E>>
where
    E: std::error::Error + 'static,
{
    phases.load(registry, config)
}
