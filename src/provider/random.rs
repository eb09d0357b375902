//! Random provider - answers every request with a random legal choice.
//!
//! Baseline policy for simulations and tests. Each answer is drawn from an
//! RNG stream derived from the seed, round, request kind and player, so
//! concurrent requests share no mutable state and a seeded game replays
//! identically.

use async_trait::async_trait;
use serde_json::json;

use super::{DecisionProvider, PhaseContext, RequestKind};
use crate::core::{GameRng, Player, ProviderError};

const LINES: [&str; 5] = [
    "I have no strong read yet; let's hear everyone out.",
    "Someone has been far too quiet. I'm watching closely.",
    "I trust my instincts, and they say the wolves are among the talkative.",
    "Let's not rush the vote without evidence.",
    "I am a simple villager, nothing more to say.",
];

/// Provider choosing uniformly among candidates.
#[derive(Clone, Debug)]
pub struct RandomProvider {
    rng: GameRng,
    abstain_probability: f64,
}

impl RandomProvider {
    /// Create a provider from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
            abstain_probability: 0.0,
        }
    }

    /// Answer with an empty response this often, exercising the
    /// absent-decision paths. Non-finite values mean never.
    #[must_use]
    pub fn with_abstain_probability(mut self, probability: f64) -> Self {
        self.abstain_probability = if probability.is_finite() {
            probability.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }

    fn answer(&self, player: &Player, context: &PhaseContext) -> String {
        let mut rng = self.rng.for_context(&format!(
            "{}/{:?}/{}/{}",
            context.round,
            context.kind,
            player.name,
            context.transcript.len()
        ));

        if self.abstain_probability > 0.0 && rng.gen_bool(self.abstain_probability) {
            return String::new();
        }

        if context.kind.is_statement() {
            return rng.choose(&LINES).copied().unwrap_or_default().to_string();
        }

        let pick = rng.choose(&context.candidates).cloned();
        let value = match context.kind {
            RequestKind::Kill | RequestKind::Check => json!({ "target": pick }),
            RequestKind::Vote => json!({ "vote": pick }),
            RequestKind::Potions => json!({
                "use_antidote": rng.gen_bool(0.5),
                "use_poison": rng.gen_bool(0.25),
                "target_name": pick,
            }),
            RequestKind::Shoot => json!({ "shoot": rng.gen_bool(0.5), "target": pick }),
            RequestKind::WerewolfDiscussion | RequestKind::Discussion => json!({}),
        };

        // Wrapped in a fence the way chat models tend to answer.
        format!("My decision:\n```json\n{value}\n```")
    }
}

#[async_trait]
impl DecisionProvider for RandomProvider {
    async fn request_decision(
        &self,
        player: &Player,
        context: &PhaseContext,
    ) -> Result<String, ProviderError> {
        Ok(self.answer(player, context))
    }
}
