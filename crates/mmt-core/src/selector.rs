//! Chooses which skill to practice next.
//!
//! Locked skills are filtered out first. With spaced repetition enabled the
//! choice is driven purely by review urgency; otherwise each skill is weighted
//! by its mastery deficit plus how long it has gone unpracticed. Either way one
//! of the three highest-ranked skills is drawn at random.

use chrono::{DateTime, Utc};
use mmt_store::{MasteryRecord, PlayerId, ProgressStore};
use rand::Rng;

use crate::{config::Settings, error::CoreError, skills::SkillDescriptor};

/// Days assumed for a skill that has never been practiced
pub const NEVER_PRACTICED_DAYS: f64 = 30.0;
/// Cap on the recency term of the weight
pub const MAX_RECENCY_WEIGHT: f64 = 50.0;
/// Recency weight gained per day without practice
pub const RECENCY_WEIGHT_PER_DAY: f64 = 5.0;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Whether `skill` is selectable given the player's progress on its prerequisite
pub fn is_unlocked<S, T>(
    store: &S,
    settings: &T,
    player: PlayerId,
    skill: &SkillDescriptor,
) -> Result<bool, CoreError>
where
    S: ProgressStore + ?Sized,
    T: Settings + ?Sized,
{
    let Some(prerequisite) = &skill.unlock_requires else {
        return Ok(true);
    };

    let mastery = store
        .get_mastery_record(player, prerequisite)?
        .map_or(0, |r| r.mastery);

    Ok(mastery >= settings.unlock_threshold())
}

/// Skills the player may currently practice, in registry order
pub fn unlocked_skills<'a, S, T>(
    store: &S,
    settings: &T,
    player: PlayerId,
    skills: &'a [SkillDescriptor],
) -> Result<Vec<&'a SkillDescriptor>, CoreError>
where
    S: ProgressStore + ?Sized,
    T: Settings + ?Sized,
{
    let mut unlocked = Vec::with_capacity(skills.len());
    for skill in skills {
        if is_unlocked(store, settings, player, skill)? {
            unlocked.push(skill);
        }
    }
    Ok(unlocked)
}

/// Fractional days since the skill was last practiced
pub fn days_since_practiced(record: Option<&MasteryRecord>, now: DateTime<Utc>) -> f64 {
    match record.and_then(|r| r.last_practiced_at) {
        Some(at) => ((now - at).num_milliseconds() as f64 / MS_PER_DAY).max(0.0),
        None => NEVER_PRACTICED_DAYS,
    }
}

/// Selection weight: mastery deficit plus capped staleness
pub fn skill_weight(record: Option<&MasteryRecord>, now: DateTime<Utc>) -> f64 {
    let mastery = record.map_or(0, |r| r.mastery);
    let mastery_weight = (100.0 - f64::from(mastery)).max(0.0);
    let recency_weight =
        (days_since_practiced(record, now) * RECENCY_WEIGHT_PER_DAY).min(MAX_RECENCY_WEIGHT);

    mastery_weight + recency_weight
}

/// Pick the next skill to practice.
///
/// # Errors
///
/// [`CoreError::NoEligibleSkill`] when every skill is still locked.
pub fn select_next<'a, S, T, R>(
    store: &S,
    settings: &T,
    player: PlayerId,
    skills: &'a [SkillDescriptor],
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<&'a SkillDescriptor, CoreError>
where
    S: ProgressStore + ?Sized,
    T: Settings + ?Sized,
    R: Rng + ?Sized,
{
    let unlocked = unlocked_skills(store, settings, player, skills)?;
    if unlocked.is_empty() {
        return Err(CoreError::NoEligibleSkill);
    }

    let mut candidates = Vec::with_capacity(unlocked.len());

    if settings.is_spaced_repetition_enabled() {
        for skill in unlocked {
            let record = store.get_repetition_record(player, &skill.id)?;
            candidates.push((skill, mmt_srs::urgency(record.as_ref(), now)));
        }
    } else {
        for skill in unlocked {
            let record = store.get_mastery_record(player, &skill.id)?;
            candidates.push((skill, skill_weight(record.as_ref(), now)));
        }
    }

    tracing::debug!(
        %player,
        spaced_repetition = settings.is_spaced_repetition_enabled(),
        candidates = ?candidates.iter().map(|(s, w)| (s.id.as_str(), *w)).collect::<Vec<_>>(),
        "Ranking skills"
    );

    let picked = mmt_srs::select_among(candidates, rng).ok_or(CoreError::NoEligibleSkill)?;
    tracing::debug!(%player, skill = %picked.id, "Selected next skill");

    Ok(picked)
}
