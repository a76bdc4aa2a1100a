use std::fmt;

/// Expected, non-error business outcomes that end a page's processing
/// without an edit. Each is counted independently in the run report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkipReason {
    /// No equivalent target page, or the target page (after one redirect
    /// hop) does not exist.
    NoTargetPage,
    /// The source talk page does not exist.
    NoSourceTalk,
    /// The source talk page is a redirect.
    SourceTalkRedirect,
    /// Extraction found no relevant banners on the source talk page.
    NoRelevantSourceBanners,
    /// No source banner survived mapping plus canonicalization.
    NoSuccessfulMapping,
    /// The target talk page exists but is a redirect.
    TargetTalkRedirect,
    /// Nothing to add and no importance upgrade, or the synthesized text
    /// equals the original.
    NoChangeNeeded,
    /// The page did not exist and the synthesized text is empty.
    CreationSkippedEmpty,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoTargetPage => "no-target-page",
            Self::NoSourceTalk => "no-source-talk",
            Self::SourceTalkRedirect => "source-talk-redirect",
            Self::NoRelevantSourceBanners => "no-relevant-source-banners",
            Self::NoSuccessfulMapping => "no-successful-mapping",
            Self::TargetTalkRedirect => "target-talk-redirect",
            Self::NoChangeNeeded => "no-change-needed",
            Self::CreationSkippedEmpty => "creation-skipped-empty",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categories for unexpected failures. Errors never abort the batch;
/// they are logged, counted per category, and processing continues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCategory {
    SourceTalkFetch,
    TargetTalkFetch,
    EquivalenceLookup,
    MappingLookup,
    Save,
    Other,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SourceTalkFetch => "source-talk-fetch",
            Self::TargetTalkFetch => "target-talk-fetch",
            Self::EquivalenceLookup => "equivalence-lookup",
            Self::MappingLookup => "mapping-lookup",
            Self::Save => "save",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
