//! Seasonal classification
//!
//! Questionnaire path: answers are encoded into a keyed ballot, the ballot
//! is classified by plurality vote, and dyed hair triggers a counterfactual
//! re-run that may produce a recommendation.
//!
//! Signal path: with no season-bearing answers, the vision signal and
//! indicator flags go through the two-axis fuser instead.
//!
//! Classification itself is synchronous and pure. Only fetching the vision
//! signal awaits, and it is bounded by a timeout; any failure degrades to
//! the questionnaire-only result.

pub mod aggregator;
pub mod encoder;
pub mod fuser;
pub mod reconcile;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::collaborators::VisionAnalyzer;
use crate::models::{Analysis, SeasonalProfile};
use crate::palette;
use crate::season::Season;
use crate::Result;

pub use aggregator::VoteTally;
pub use encoder::{EncodedAnswers, TraitId};
pub use fuser::{Indicators, Undertone, VisionSignal};
pub use reconcile::Recommendation;

/// Default bound on a vision analysis round trip
pub const DEFAULT_SIGNAL_TIMEOUT: Duration = Duration::from_secs(8);

/// Input of one classification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    /// Question id → raw answer
    #[serde(default)]
    pub answers: BTreeMap<String, String>,
    /// Signal already obtained by the caller, if any
    #[serde(default)]
    pub signal: Option<VisionSignal>,
}

/// Which classifier produced the season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationMethod {
    Questionnaire,
    SignalFusion,
}

/// Result of a classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationOutcome {
    pub season: Season,
    pub method: ClassificationMethod,
    /// No vote was cast; the season is the canonical default
    pub degenerate: bool,
    /// A vision signal was requested but could not be obtained
    pub degraded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,
    pub profile: SeasonalProfile,
}

impl ClassificationOutcome {
    /// Fresh analysis with the default profile and no favorites
    pub fn into_analysis(self) -> Analysis {
        Analysis::new(self.season, self.profile)
    }
}

/// Classify a questionnaire, optionally with a vision signal
///
/// Fails only on malformed answers.
pub fn classify(answers: &BTreeMap<String, String>, signal: Option<&VisionSignal>) -> Result<ClassificationOutcome> {
    let encoded = encoder::encode(answers)?;

    let outcome = if !encoded.ballot.is_empty() {
        classify_ballot(&encoded)
    } else if signal.is_some() || !encoded.indicators.is_empty() {
        let season = fuser::fuse(signal, &encoded.indicators);
        debug!(%season, has_signal = signal.is_some(), "Classified from undertone signals");
        outcome(season, ClassificationMethod::SignalFusion, false, None)
    } else {
        classify_ballot(&encoded)
    };

    Ok(outcome)
}

fn classify_ballot(encoded: &EncodedAnswers) -> ClassificationOutcome {
    let tally = VoteTally::from_votes(encoded.ballot.values().copied());
    let season = tally.winner();
    let degenerate = tally.is_degenerate();
    if degenerate {
        warn!(%season, "No season votes cast, using canonical default");
    }

    let recommendation = reconcile::reconcile(encoded, season);
    debug!(
        %season,
        votes = tally.total(),
        recommended = recommendation.is_some(),
        "Classified questionnaire"
    );
    outcome(season, ClassificationMethod::Questionnaire, degenerate, recommendation)
}

fn outcome(
    season: Season,
    method: ClassificationMethod,
    degenerate: bool,
    recommendation: Option<Recommendation>,
) -> ClassificationOutcome {
    ClassificationOutcome {
        season,
        method,
        degenerate,
        degraded: false,
        recommendation,
        profile: palette::default_profile(season),
    }
}

/// Classification front end with optional vision analysis
#[derive(Clone)]
pub struct ColorAnalyzer {
    vision: Option<Arc<dyn VisionAnalyzer>>,
    signal_timeout: Duration,
}

impl ColorAnalyzer {
    /// Analyzer without a vision backend
    pub fn questionnaire_only() -> Self {
        Self {
            vision: None,
            signal_timeout: DEFAULT_SIGNAL_TIMEOUT,
        }
    }

    pub fn with_vision(vision: Arc<dyn VisionAnalyzer>, signal_timeout: Duration) -> Self {
        Self {
            vision: Some(vision),
            signal_timeout,
        }
    }

    pub fn has_vision(&self) -> bool {
        self.vision.is_some()
    }

    /// Fetch a vision signal, or `None` on any failure or timeout
    pub async fn fetch_signal(&self, image: &[u8]) -> Option<VisionSignal> {
        let vision = self.vision.as_ref()?;

        match tokio::time::timeout(self.signal_timeout, vision.analyze(image)).await {
            Ok(Ok(signal)) => match signal.validate() {
                Ok(signal) => {
                    debug!(undertone = ?signal.undertone, "Vision signal received");
                    Some(signal)
                }
                Err(e) => {
                    warn!("Discarding vision signal: {}", e);
                    None
                }
            },
            Ok(Err(e)) => {
                warn!("{}; classifying from questionnaire only", e);
                None
            }
            Err(_) => {
                warn!(
                    "Vision analysis timed out after {:?}; classifying from questionnaire only",
                    self.signal_timeout
                );
                None
            }
        }
    }

    /// Classify a request, consulting the vision backend when an image is given
    pub async fn analyze(&self, request: &ClassificationRequest, image: Option<&[u8]>) -> Result<ClassificationOutcome> {
        let mut degraded = false;
        let signal = match (request.signal, image) {
            (Some(signal), _) => Some(signal.validate()?),
            (None, Some(bytes)) if self.has_vision() => {
                let fetched = self.fetch_signal(bytes).await;
                degraded = fetched.is_none();
                fetched
            }
            (None, _) => None,
        };

        let mut outcome = classify(&request.answers, signal.as_ref())?;
        outcome.degraded = degraded;
        info!(
            season = %outcome.season,
            method = ?outcome.method,
            degraded,
            "Classification complete"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::ExternalSignalUnavailable;
    use async_trait::async_trait;

    fn answers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    struct FixedVision(Undertone);

    #[async_trait]
    impl VisionAnalyzer for FixedVision {
        async fn analyze(&self, _image: &[u8]) -> std::result::Result<VisionSignal, ExternalSignalUnavailable> {
            Ok(VisionSignal {
                undertone: self.0,
                intensity: 0.5,
                confidence: 0.8,
            })
        }
    }

    struct BrokenVision;

    #[async_trait]
    impl VisionAnalyzer for BrokenVision {
        async fn analyze(&self, _image: &[u8]) -> std::result::Result<VisionSignal, ExternalSignalUnavailable> {
            Err(ExternalSignalUnavailable::new("service returned 500"))
        }
    }

    struct StalledVision;

    #[async_trait]
    impl VisionAnalyzer for StalledVision {
        async fn analyze(&self, _image: &[u8]) -> std::result::Result<VisionSignal, ExternalSignalUnavailable> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Err(ExternalSignalUnavailable::new("unreachable"))
        }
    }

    #[test]
    fn test_questionnaire_outcome_carries_default_profile() {
        let outcome = classify(&answers(&[("skinTone", "summer-cool"), ("eyeColor", "summer-soft")]), None).unwrap();
        assert_eq!(outcome.season, Season::Summer);
        assert_eq!(outcome.method, ClassificationMethod::Questionnaire);
        assert!(!outcome.degenerate);
        assert_eq!(outcome.profile, palette::default_profile(Season::Summer));

        let analysis = outcome.into_analysis();
        assert!(analysis.favorites.is_empty());
    }

    #[test]
    fn test_empty_answers_flag_degenerate_spring() {
        let outcome = classify(&BTreeMap::new(), None).unwrap();
        assert_eq!(outcome.season, Season::Spring);
        assert!(outcome.degenerate);
        assert_eq!(outcome.method, ClassificationMethod::Questionnaire);
    }

    #[test]
    fn test_signal_only_uses_fuser() {
        let signal = VisionSignal {
            undertone: Undertone::Warm,
            intensity: 0.4,
            confidence: 0.7,
        };
        let outcome = classify(&answers(&[("contrast", "high")]), Some(&signal)).unwrap();
        assert_eq!(outcome.season, Season::Autumn);
        assert_eq!(outcome.method, ClassificationMethod::SignalFusion);
    }

    #[test]
    fn test_ballot_takes_precedence_over_signal() {
        let signal = VisionSignal {
            undertone: Undertone::Warm,
            intensity: 0.4,
            confidence: 0.7,
        };
        let outcome = classify(&answers(&[("skinTone", "winter-cool")]), Some(&signal)).unwrap();
        assert_eq!(outcome.season, Season::Winter);
        assert_eq!(outcome.method, ClassificationMethod::Questionnaire);
    }

    #[tokio::test]
    async fn test_analyze_uses_vision_when_image_given() {
        let analyzer = ColorAnalyzer::with_vision(Arc::new(FixedVision(Undertone::Cool)), Duration::from_secs(1));
        let request = ClassificationRequest {
            answers: answers(&[("contrast", "high")]),
            signal: None,
        };
        let outcome = analyzer.analyze(&request, Some(b"jpeg")).await.unwrap();
        assert_eq!(outcome.season, Season::Winter);
        assert!(!outcome.degraded);
    }

    #[tokio::test]
    async fn test_analyze_degrades_on_vision_failure() {
        let analyzer = ColorAnalyzer::with_vision(Arc::new(BrokenVision), Duration::from_secs(1));
        let request = ClassificationRequest {
            answers: answers(&[("skinTone", "autumn-warm")]),
            signal: None,
        };
        let outcome = analyzer.analyze(&request, Some(b"jpeg")).await.unwrap();
        assert_eq!(outcome.season, Season::Autumn);
        assert!(outcome.degraded);
    }

    #[tokio::test]
    async fn test_analyze_does_not_wait_past_timeout() {
        let analyzer = ColorAnalyzer::with_vision(Arc::new(StalledVision), Duration::from_millis(200));
        let request = ClassificationRequest {
            answers: answers(&[("eyeColor", "spring-bright")]),
            signal: None,
        };
        let outcome = analyzer.analyze(&request, Some(b"jpeg")).await.unwrap();
        assert_eq!(outcome.season, Season::Spring);
        assert!(outcome.degraded);
    }

    #[tokio::test]
    async fn test_analyze_rejects_malformed_answers() {
        let analyzer = ColorAnalyzer::questionnaire_only();
        let request = ClassificationRequest {
            answers: answers(&[("skinTone", "warm")]),
            signal: None,
        };
        assert!(matches!(
            analyzer.analyze(&request, None).await,
            Err(crate::Error::Validation(_))
        ));
    }
}
