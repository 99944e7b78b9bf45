use std::fmt;

/// Stages of a retype run, in the order they are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Reading,
    SectionsLocated,
    MassesParsed,
    MappingBuilt,
    Writing,
    Done,
}

impl Stage {
    pub fn description(self) -> &'static str {
        match self {
            Stage::Reading => "Reading input",
            Stage::SectionsLocated => "Located Masses and Atoms sections",
            Stage::MassesParsed => "Parsed Masses section",
            Stage::MappingBuilt => "Built type mapping",
            Stage::Writing => "Writing output",
            Stage::Done => "Done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    StageEntered(Stage),
    /// The run stopped while in `stage`.
    Failed { stage: Stage, reason: String },
    /// A non-fatal note about the run, such as skipped or unmapped lines.
    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    #[inline]
    pub fn enter(&self, stage: Stage) {
        self.report(Progress::StageEntered(stage));
    }
}
