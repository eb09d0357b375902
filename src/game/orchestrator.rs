//! Game orchestrator: the round state machine.
//!
//! ## Phase Loop
//!
//! ```text
//! Setup -> NightWerewolf -> NightSeer -> NightWitch -> NightResolve -> WinCheckNight
//!       -> DayDiscuss -> DayVote -> DayHunter -> WinCheckDay -> NightWerewolf | Terminated
//! ```
//!
//! One phase runs at a time. Simultaneous phases (the werewolf kill vote and
//! the day vote) fan requests out to every participant and join on all of
//! them before tallying. Discussion phases ask players one at a time in seat
//! order, recording each statement before the next player is asked.
//!
//! ## Faults
//!
//! A provider error, panic or timeout is logged and becomes
//! `Decision::Absent`; each phase applies its own fallback. Sink failures are
//! logged and ignored. Only configuration errors at construction and
//! invariant violations end a run with an error.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::future::join_all;
use futures::FutureExt;
use im::Vector;
use serde::Serialize;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use super::prompts;
use crate::core::{GameConfig, GameError, GameRng, GameState, Phase, Player, PlayerId, Roster};
use crate::decisions::{
    CheckChoice, Decision, DecisionExtractor, KillChoice, ShootChoice, VoteChoice, WitchChoice,
};
use crate::moderator::{Announcement, Audience, Channel, Moderator};
use crate::provider::{DecisionProvider, PhaseContext, RequestKind};
use crate::roles::{Persona, Role, RoleRegistry, DEFAULT_TEMPERAMENT};
use crate::rules::{GameResult, VoteTally, WinConditionEvaluator};
use crate::sink::{EventSink, GameEvent};

/// Final report of a finished game.
#[derive(Clone, Debug, Serialize)]
pub struct GameOutcome {
    pub result: GameResult,
    /// Round in which the game ended.
    pub rounds_played: u32,
    /// Names of living players at the end, in seat order.
    pub survivors: Vec<String>,
    /// Every announcement and statement, private ones included.
    pub transcript: Vector<Announcement>,
    /// Bodies of every moderator announcement.
    pub moderator_log: Vec<String>,
}

/// Runs one game against a decision provider, publishing to a sink.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use werewolf_engine::core::GameConfig;
/// use werewolf_engine::game::GameOrchestrator;
/// use werewolf_engine::provider::RandomProvider;
/// use werewolf_engine::sink::NullSink;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let config = GameConfig::new(6).with_seed(3);
/// let mut game = GameOrchestrator::new(
///     config,
///     Arc::new(RandomProvider::new(3)),
///     Arc::new(NullSink),
/// )
/// .unwrap();
///
/// let outcome = game.run().await.unwrap();
/// assert!(outcome.rounds_played <= 10);
/// # });
/// ```
pub struct GameOrchestrator {
    config: GameConfig,
    provider: Arc<dyn DecisionProvider>,
    sink: Arc<dyn EventSink>,
    moderator: Moderator,
    state: GameState,
    rng: GameRng,
}

impl GameOrchestrator {
    /// Deal the standard role mix for the configured player count, shuffled
    /// by the configured seed.
    pub fn new(
        config: GameConfig,
        provider: Arc<dyn DecisionProvider>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let mut rng = GameRng::new(config.seed);
        let mut roles = RoleRegistry::standard_setup(config.player_count)?;
        rng.shuffle(&mut roles);
        Self::seat(config, roles, rng, provider, sink)
    }

    /// Deal `roles` in seat order, without shuffling.
    pub fn with_roles(
        config: GameConfig,
        roles: Vec<Role>,
        provider: Arc<dyn DecisionProvider>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, GameError> {
        config.validate()?;
        if roles.len() != config.player_count {
            return Err(GameError::configuration(format!(
                "{} roles given for {} players",
                roles.len(),
                config.player_count
            )));
        }
        let rng = GameRng::new(config.seed);
        Self::seat(config, roles, rng, provider, sink)
    }

    fn seat(
        config: GameConfig,
        roles: Vec<Role>,
        rng: GameRng,
        provider: Arc<dyn DecisionProvider>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, GameError> {
        provider.ensure_ready().map_err(|err| {
            GameError::configuration(format!("decision provider is not ready: {err}"))
        })?;

        let identities = identities(&config, &mut rng.for_context("personas"));
        let seats = identities
            .into_iter()
            .zip(roles)
            .map(|((name, temperament), role)| (name, role, temperament))
            .collect();

        let state = GameState::new(Roster::new(seats));
        state.check_invariants()?;

        Ok(Self {
            config,
            provider,
            sink,
            moderator: Moderator::new(),
            state,
            rng,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn moderator(&self) -> &Moderator {
        &self.moderator
    }

    // === Driving ===

    /// Run phases until the game terminates.
    pub async fn run(&mut self) -> Result<GameOutcome, GameError> {
        while self.state.phase != Phase::Terminated {
            self.step().await?;
        }
        self.outcome()
    }

    /// Run the current phase and move to the next one. Returns the new phase.
    pub async fn step(&mut self) -> Result<Phase, GameError> {
        let phase = self.state.phase;
        let next = match phase {
            Phase::Setup => {
                self.setup().await;
                phase.next()
            }
            Phase::NightWerewolf => {
                self.night_werewolf().await;
                phase.next()
            }
            Phase::NightSeer => {
                self.night_seer().await;
                phase.next()
            }
            Phase::NightWitch => {
                self.night_witch().await;
                phase.next()
            }
            Phase::NightResolve => {
                self.resolve_night().await?;
                phase.next()
            }
            Phase::WinCheckNight => {
                if self.check_winner().await.is_some() {
                    Phase::Terminated
                } else {
                    phase.next()
                }
            }
            Phase::DayDiscuss => {
                self.day_discuss().await;
                phase.next()
            }
            Phase::DayVote => {
                self.day_vote().await?;
                phase.next()
            }
            Phase::DayHunter => {
                self.day_hunter().await?;
                phase.next()
            }
            Phase::WinCheckDay => {
                if self.check_winner().await.is_some() {
                    Phase::Terminated
                } else if self.state.round >= self.config.max_rounds {
                    self.finish(GameResult::NoResolution).await;
                    Phase::Terminated
                } else {
                    self.state.advance_round();
                    phase.next()
                }
            }
            Phase::Terminated => Phase::Terminated,
        };

        if next != phase {
            info!(
                round = self.state.round,
                from = %phase,
                to = %next,
                night = next.is_night(),
                "Phase transition"
            );
        }
        self.state.phase = next;
        Ok(next)
    }

    /// Final report, once the game has a result.
    pub fn outcome(&self) -> Result<GameOutcome, GameError> {
        let result = self
            .state
            .result
            .ok_or_else(|| GameError::invariant("game has not produced a result"))?;

        Ok(GameOutcome {
            result,
            rounds_played: self.state.round,
            survivors: self.state.living_names().into_iter().map(str::to_string).collect(),
            transcript: self.state.transcript().clone(),
            moderator_log: self.moderator.log().to_vec(),
        })
    }

    // === Phases ===

    /// Announce the players, reveal roles privately and publish the roster.
    pub async fn setup(&mut self) {
        info!(
            players = self.state.roster.len(),
            seed = self.config.seed,
            "Setting up game"
        );

        let names = self.state.living_names();
        let start = self.moderator.game_start(&names);
        self.emit(start).await;

        let reveals: Vec<Announcement> = self
            .state
            .roster
            .iter()
            .map(|p| self.moderator.role_reveal(p, RoleRegistry::info(p.role)))
            .collect();
        for reveal in reveals {
            self.emit(reveal).await;
        }

        let pack: Vec<&str> = self
            .state
            .roster
            .living_werewolves()
            .map(|p| p.name.as_str())
            .collect();
        if !pack.is_empty() {
            let reveal = self.moderator.pack_revealed(&pack);
            self.emit(reveal).await;
        }

        self.publish(GameEvent::roster(&self.state.roster)).await;
    }

    /// Werewolves discuss privately, then each votes for a victim.
    ///
    /// A werewolf without a usable vote is given a random living
    /// non-werewolf, so the phase always yields a victim while any werewolf
    /// and any prey are alive.
    pub async fn night_werewolf(&mut self) -> Option<PlayerId> {
        let dusk = self.moderator.night_falls(self.state.round);
        self.emit(dusk).await;

        let wolves: Vec<Player> = self.state.roster.living_werewolves().cloned().collect();
        let prey: Vec<PlayerId> = self
            .state
            .roster
            .living_non_werewolves()
            .map(|p| p.id)
            .collect();
        if wolves.is_empty() || prey.is_empty() {
            debug!(round = self.state.round, "No werewolf kill tonight");
            return None;
        }

        let names = self.state.living_names();
        let wake = self.moderator.werewolves_wake(&names);
        self.emit(wake).await;

        for _ in 0..self.config.werewolf_discussion_rounds {
            for wolf in &wolves {
                let answer = self.ask(wolf, RequestKind::WerewolfDiscussion, Vec::new()).await;
                self.speak(wolf, answer, Channel::Night, Audience::Werewolves).await;
            }
        }

        let open = self.moderator.kill_vote_opens();
        self.emit(open).await;

        let prey_names = self.names(&prey);
        let answers = join_all(
            wolves
                .iter()
                .map(|wolf| self.ask(wolf, RequestKind::Kill, prey_names.clone())),
        )
        .await;

        let mut votes = Vec::with_capacity(wolves.len());
        for (wolf, answer) in wolves.iter().zip(answers) {
            let choice = answer
                .and_then(|raw| DecisionExtractor::extract_as::<KillChoice>(&raw))
                .and_then(|c| self.resolve(&c.target, &prey));
            let target = match choice {
                Decision::Made(id) => Some(id),
                Decision::Absent => {
                    let fallback = self.rng.choose(&prey).copied();
                    info!(
                        round = self.state.round,
                        player = %wolf.name,
                        fallback = ?fallback.map(|id| self.state.roster.name(id)),
                        "No usable kill vote; substituting a random target"
                    );
                    fallback
                }
            };
            votes.push((wolf.id, target));
        }

        let outcome = VoteTally::tally(votes);
        let victim = outcome.winner?;
        self.state.night.killed = Some(victim);

        let name = self.state.roster.name(victim).to_string();
        info!(
            round = self.state.round,
            victim = %name,
            votes = outcome.count,
            tied = outcome.tied,
            "Werewolves chose a victim"
        );
        let chosen = self.moderator.kill_chosen(&name);
        self.emit(chosen).await;

        Some(victim)
    }

    /// The seer checks one other living player and learns their team.
    ///
    /// Returns the checked player and whether they are a werewolf. An absent
    /// decision yields no information.
    pub async fn night_seer(&mut self) -> Option<(PlayerId, bool)> {
        let seer = self.state.living_singleton(Role::Seer).cloned()?;

        let wake = self.moderator.seer_wakes();
        self.emit(wake).await;

        let targets: Vec<PlayerId> = self
            .state
            .roster
            .alive()
            .filter(|p| p.id != seer.id)
            .map(|p| p.id)
            .collect();
        let answer = self.ask(&seer, RequestKind::Check, self.names(&targets)).await;
        let choice = answer
            .and_then(|raw| DecisionExtractor::extract_as::<CheckChoice>(&raw))
            .and_then(|c| self.resolve(&c.target, &targets));

        let Decision::Made(target) = choice else {
            info!(round = self.state.round, player = %seer.name, "Seer made no check");
            return None;
        };

        let checked = &self.state.roster[target];
        let is_werewolf = checked.role.is_werewolf();
        let name = checked.name.clone();
        debug!(round = self.state.round, target = %name, is_werewolf, "Seer checked a player");

        let result = self.moderator.seer_result(seer.id, &name, is_werewolf);
        self.emit(result).await;

        Some((target, is_werewolf))
    }

    /// The witch learns tonight's victim and may use her potions.
    ///
    /// The antidote only applies when there is a victim and it is unused.
    /// The poison needs an unused poison and a living target. Nothing is
    /// consumed by a request that cannot take effect.
    pub async fn night_witch(&mut self) {
        let Some(witch) = self.state.living_singleton(Role::Witch).cloned() else {
            return;
        };

        let wake = self.moderator.witch_wakes();
        self.emit(wake).await;

        let victim = self.state.night.killed;
        let victim_name = victim.map(|id| self.state.roster.name(id).to_string());
        let briefing = self
            .moderator
            .witch_briefing(witch.id, victim_name.as_deref(), self.state.witch);
        self.emit(briefing).await;

        if !self.state.witch.antidote && !self.state.witch.poison {
            debug!(round = self.state.round, "Witch has no potions left");
            return;
        }

        let targets = self.state.roster.alive_ids();
        let answer = self.ask(&witch, RequestKind::Potions, self.names(&targets)).await;
        let Decision::Made(choice) =
            answer.and_then(|raw| DecisionExtractor::extract_as::<WitchChoice>(&raw))
        else {
            info!(round = self.state.round, player = %witch.name, "Witch took no action");
            return;
        };

        if choice.use_antidote {
            match victim.filter(|_| self.state.witch.antidote) {
                Some(saved) => {
                    self.state.witch.take_antidote();
                    self.state.night.saved = Some(saved);
                    let name = self.state.roster.name(saved).to_string();
                    info!(round = self.state.round, saved = %name, "Witch used the antidote");
                    let used = self.moderator.antidote_used(witch.id, &name);
                    self.emit(used).await;
                }
                None => debug!(round = self.state.round, "Antidote request had no effect"),
            }
        }

        if choice.use_poison && self.state.witch.poison {
            let target = choice
                .target_name
                .as_deref()
                .map_or(Decision::Absent, |name| self.resolve(name, &targets));
            match target {
                Decision::Made(poisoned) => {
                    self.state.witch.take_poison();
                    self.state.night.poisoned = Some(poisoned);
                    let name = self.state.roster.name(poisoned).to_string();
                    info!(round = self.state.round, poisoned = %name, "Witch used the poison");
                    let used = self.moderator.poison_used(witch.id, &name);
                    self.emit(used).await;
                }
                Decision::Absent => {
                    debug!(round = self.state.round, "Poison request named no valid target");
                }
            }
        }
    }

    /// Apply the night's deaths and announce them at daybreak.
    pub async fn resolve_night(&mut self) -> Result<SmallVec<[PlayerId; 2]>, GameError> {
        let deaths = self.state.night.deaths();
        let died = self.state.apply_deaths(&deaths);
        self.state.check_invariants()?;

        let names: Vec<String> = died
            .iter()
            .map(|&id| self.state.roster.name(id).to_string())
            .collect();
        info!(round = self.state.round, dead = ?names, "Night resolved");

        let dawn = self.moderator.day_breaks(self.state.round);
        self.emit(dawn).await;
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let report = self.moderator.deaths(&refs);
        self.emit(report).await;

        if !died.is_empty() {
            self.publish(GameEvent::roster(&self.state.roster)).await;
        }
        Ok(died)
    }

    /// Evaluate the win conditions and end the game if a team has won.
    pub async fn check_winner(&mut self) -> Option<GameResult> {
        let team = WinConditionEvaluator::evaluate_roster(&self.state.roster)?;
        let result = GameResult::Winner(team);
        self.finish(result).await;
        Some(result)
    }

    /// Every living player speaks once, in seat order.
    pub async fn day_discuss(&mut self) {
        let names = self.state.living_names();
        let open = self.moderator.discussion_opens(&names);
        self.emit(open).await;

        let speakers: Vec<Player> = self.state.roster.alive().cloned().collect();
        for speaker in &speakers {
            let answer = self.ask(speaker, RequestKind::Discussion, Vec::new()).await;
            self.speak(speaker, answer, Channel::Day, Audience::Everyone).await;
        }
    }

    /// Every living player votes; the tally winner is exiled and dies.
    ///
    /// Absent or invalid votes are abstentions.
    pub async fn day_vote(&mut self) -> Result<Option<PlayerId>, GameError> {
        let open = self.moderator.vote_opens();
        self.emit(open).await;

        let voters: Vec<Player> = self.state.roster.alive().cloned().collect();
        let candidates = self.state.roster.alive_ids();
        let names = self.names(&candidates);

        let answers = join_all(
            voters
                .iter()
                .map(|voter| self.ask(voter, RequestKind::Vote, names.clone())),
        )
        .await;

        let votes: Vec<(PlayerId, Option<PlayerId>)> = voters
            .iter()
            .zip(answers)
            .map(|(voter, answer)| {
                let target = answer
                    .and_then(|raw| DecisionExtractor::extract_as::<VoteChoice>(&raw))
                    .and_then(|c| self.resolve(&c.vote, &candidates))
                    .into_option();
                if target.is_none() {
                    debug!(round = self.state.round, player = %voter.name, "Abstained");
                }
                (voter.id, target)
            })
            .collect();

        let outcome = VoteTally::tally(votes);
        let named = outcome.clone().map(|id| self.state.roster.name(id).to_string());
        let (exiled_name, count) = named.as_pair();
        info!(
            round = self.state.round,
            exiled = %exiled_name,
            votes = count,
            tied = named.tied,
            "Vote resolved"
        );
        let result = self.moderator.vote_result(&named);
        self.emit(result).await;

        let Some(exiled) = outcome.winner else {
            return Ok(None);
        };
        self.state.exiled = Some(exiled);
        self.state.apply_deaths(&[exiled]);
        self.state.check_invariants()?;
        self.publish(GameEvent::roster(&self.state.roster)).await;

        Ok(Some(exiled))
    }

    /// An exiled hunter may shoot one other living player.
    pub async fn day_hunter(&mut self) -> Result<Option<PlayerId>, GameError> {
        let Some(hunter) = self
            .state
            .exiled
            .map(|id| self.state.roster[id].clone())
            .filter(|p| p.role == Role::Hunter)
        else {
            return Ok(None);
        };

        let triggered = self.moderator.hunter_triggered(&hunter.name);
        self.emit(triggered).await;

        let targets: Vec<PlayerId> = self
            .state
            .roster
            .alive()
            .filter(|p| p.id != hunter.id)
            .map(|p| p.id)
            .collect();
        let answer = self.ask(&hunter, RequestKind::Shoot, self.names(&targets)).await;
        let shot = answer
            .and_then(|raw| DecisionExtractor::extract_as::<ShootChoice>(&raw))
            .and_then(|c| match c.target {
                Some(name) if c.shoot => self.resolve(&name, &targets),
                _ => Decision::Absent,
            });

        let Decision::Made(target) = shot else {
            info!(round = self.state.round, player = %hunter.name, "Hunter held fire");
            return Ok(None);
        };

        self.state.apply_deaths(&[target]);
        self.state.check_invariants()?;

        let name = self.state.roster.name(target).to_string();
        info!(round = self.state.round, target = %name, "Hunter fired");
        let fired = self.moderator.hunter_shot(&hunter.name, &name);
        self.emit(fired).await;
        self.publish(GameEvent::roster(&self.state.roster)).await;

        Ok(Some(target))
    }

    // === Helpers ===

    async fn finish(&mut self, result: GameResult) {
        info!(round = self.state.round, %result, "Game over");
        self.state.result = Some(result);

        let over = self.moderator.game_over(&result);
        self.emit(over).await;
        self.publish(GameEvent::GameOver {
            result,
            rounds_played: self.state.round,
        })
        .await;
    }

    /// Ask one player for a decision. Faults and timeouts become `Absent`.
    async fn ask(&self, player: &Player, kind: RequestKind, candidates: Vec<String>) -> Decision<String> {
        let round = self.state.round;
        let phase = self.state.phase;
        let victim = self.state.night.killed.map(|id| self.state.roster.name(id));

        let context = PhaseContext {
            round,
            phase,
            kind,
            player: player.name.clone(),
            role: player.role,
            briefing: prompts::briefing(player),
            instruction: prompts::instruction(kind, &candidates, victim, self.state.witch),
            candidates,
            transcript: self.state.visible_transcript(player),
        };

        let request = AssertUnwindSafe(self.provider.request_decision(player, &context)).catch_unwind();
        match tokio::time::timeout(self.config.decision_timeout, request).await {
            Ok(Ok(Ok(raw))) => {
                debug!(round, %phase, player = %player.name, ?kind, "Decision received");
                Decision::Made(raw)
            }
            Ok(Ok(Err(err))) => {
                warn!(round, %phase, player = %player.name, error = %err, "Decision provider failed; treating as absent");
                Decision::Absent
            }
            Ok(Err(_)) => {
                warn!(round, %phase, player = %player.name, "Decision provider panicked; treating as absent");
                Decision::Absent
            }
            Err(_) => {
                warn!(
                    round,
                    %phase,
                    player = %player.name,
                    timeout_ms = self.config.decision_timeout.as_millis() as u64,
                    "Decision request timed out; treating as absent"
                );
                Decision::Absent
            }
        }
    }

    /// Record a player's statement, if they made one.
    async fn speak(&mut self, speaker: &Player, answer: Decision<String>, channel: Channel, audience: Audience) {
        match answer.and_then(|raw| DecisionExtractor::statement(&raw)) {
            Decision::Made(text) => {
                let statement = Announcement::statement(speaker.name.clone(), text, channel, audience);
                self.emit(statement).await;
            }
            Decision::Absent => {
                debug!(round = self.state.round, player = %speaker.name, "Stayed silent");
            }
        }
    }

    /// Record an announcement in the transcript and publish it.
    async fn emit(&mut self, announcement: Announcement) {
        self.state.record(announcement.clone());
        self.publish(GameEvent::Message(announcement)).await;
    }

    async fn publish(&self, event: GameEvent) {
        if let Err(err) = self.sink.publish(&event).await {
            warn!(
                round = self.state.round,
                phase = %self.state.phase,
                error = %err,
                "Event sink failed; continuing"
            );
        }
    }

    /// A named player, if they are among `candidates`.
    fn resolve(&self, name: &str, candidates: &[PlayerId]) -> Decision<PlayerId> {
        self.state
            .roster
            .find(name)
            .filter(|id| candidates.contains(id))
            .into()
    }

    fn names(&self, ids: &[PlayerId]) -> Vec<String> {
        ids.iter()
            .map(|&id| self.state.roster.name(id).to_string())
            .collect()
    }
}

/// Names and temperaments in seat order: configured names, or personas
/// sampled from `rng` and `Player N` beyond the persona catalog.
fn identities(config: &GameConfig, rng: &mut GameRng) -> Vec<(String, String)> {
    let personas = RoleRegistry::personas();
    let temperament_of = |name: &str| {
        personas
            .iter()
            .find(|p| p.name == name)
            .map_or(DEFAULT_TEMPERAMENT, |p| p.temperament)
            .to_string()
    };

    match &config.player_names {
        Some(names) => names
            .iter()
            .map(|n| {
                let name = n.trim().to_string();
                let temperament = temperament_of(&name);
                (name, temperament)
            })
            .collect(),
        None => {
            let mut pool: Vec<Persona> = personas.to_vec();
            rng.shuffle(&mut pool);
            (0..config.player_count)
                .map(|i| match pool.get(i) {
                    Some(p) => (p.name.to_string(), p.temperament.to_string()),
                    None => (format!("Player {}", i + 1), DEFAULT_TEMPERAMENT.to_string()),
                })
                .collect()
        }
    }
}
