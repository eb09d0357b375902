//! Briefings and per-request instructions handed to decision providers.
//!
//! The briefing is fixed for a player for the whole game. The instruction
//! changes per request and always spells out the expected answer format,
//! which matches the typed choices in `crate::decisions`.

use crate::core::{Player, WitchInventory};
use crate::moderator::format_names;
use crate::provider::RequestKind;
use crate::roles::{Role, RoleRegistry};

/// Role briefing with the player's persona.
pub fn briefing(player: &Player) -> String {
    let info = RoleRegistry::info(player.role);
    let play = match player.role {
        Role::Werewolf => {
            "Agree on a victim with the other werewolves at night. By day, hide your identity and mislead the good players."
        }
        Role::Seer => "Use your checks to find the werewolves, and reveal results when it helps the vote.",
        Role::Witch => "Use your potions carefully; each one works only once per game.",
        Role::Hunter => "If the village exiles you, take a werewolf down with you.",
        Role::Guardian => "Watch the discussion closely and protect the village with your vote.",
        Role::Villager => "Watch for slips in the discussion and vote the werewolves out.",
    };

    format!(
        "You are {name}, playing a game of werewolf as the {role} ({team} team).\n\
         Ability - {ability_name}: {ability}\n\
         Win condition: {win}\n\
         {play}\n\
         Personality: {temperament}. Stay in character.",
        name = player.name,
        role = info.role,
        team = info.team(),
        ability_name = info.ability_name,
        ability = info.ability,
        win = info.win_condition,
        temperament = player.temperament,
    )
}

/// Instruction for one request.
///
/// `victim` and `inventory` are only read for `Potions`.
pub fn instruction(
    kind: RequestKind,
    candidates: &[String],
    victim: Option<&str>,
    inventory: WitchInventory,
) -> String {
    let names = format_names(candidates);
    match kind {
        RequestKind::WerewolfDiscussion => {
            "Speak privately to the other werewolves about tonight's victim. Answer in one or two sentences.".to_string()
        }
        RequestKind::Kill => format!(
            "Choose tonight's victim from: {names}.\nAnswer with JSON: {{\"target\": \"<name>\"}}"
        ),
        RequestKind::Check => format!(
            "Choose one player to check from: {names}.\nAnswer with JSON: {{\"target\": \"<name>\"}}"
        ),
        RequestKind::Potions => {
            let attacked = victim.map_or_else(
                || "Nobody was attacked tonight.".to_string(),
                |v| format!("{v} was attacked tonight."),
            );
            format!(
                "{attacked} Antidote available: {}. Poison available: {}.\n\
                 Poison targets: {names}.\n\
                 Answer with JSON: {{\"use_antidote\": true|false, \"use_poison\": true|false, \"target_name\": \"<name or null>\"}}",
                inventory.antidote, inventory.poison
            )
        }
        RequestKind::Discussion => {
            "Share your thoughts with the village. Answer in a few sentences, in character.".to_string()
        }
        RequestKind::Vote => format!(
            "Vote for the player to exile from: {names}.\nAnswer with JSON: {{\"vote\": \"<name>\"}}"
        ),
        RequestKind::Shoot => format!(
            "You were exiled. You may shoot one of: {names}.\n\
             Answer with JSON: {{\"shoot\": true|false, \"target\": \"<name or null>\"}}"
        ),
    }
}
