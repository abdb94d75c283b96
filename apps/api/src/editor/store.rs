//! In-memory editor draft with best-effort local caching.
//!
//! Every mutation builds a new `Draft` and swaps it in whole; readers only ever
//! see complete drafts. The cache file is rewritten after each swap.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::editor::sample::sample_resume;
use crate::errors::AppError;
use crate::export::delivery::write_atomically;
use crate::export::{ExportError, ResumeSnapshot, SnapshotSource};
use crate::models::resume::{
    Achievement, Certification, Education, Experience, ResumeData, Skill,
};
use crate::models::theme::Theme;

/// The editor's current resume and selected theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub resume: ResumeData,
    pub theme: Theme,
}

// ────────────────────────────────────────────────────────────────────────────
// Entry ids
// ────────────────────────────────────────────────────────────────────────────

/// Largest id accepted from clients: JavaScript's `Number.MAX_SAFE_INTEGER`.
/// Anything above it is reassigned, which also keeps `next_id` far from `u64::MAX`.
pub const MAX_ENTRY_ID: u64 = (1 << 53) - 1;

/// Hands out entry ids that are at least the current epoch millis and strictly
/// increasing within the process.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicU64,
}

impl IdGenerator {
    pub fn next_id(&self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let mut prev = self.last.load(Ordering::Acquire);
        loop {
            let candidate = now.max(prev.saturating_add(1));
            match self.last.compare_exchange_weak(
                prev,
                candidate,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }

    /// Ensures future ids are greater than `id`. Ids above [`MAX_ENTRY_ID`] are ignored.
    pub fn observe(&self, id: u64) {
        if id <= MAX_ENTRY_ID {
            self.last.fetch_max(id, Ordering::AcqRel);
        }
    }
}

/// Gives a fresh id to every entry whose id is zero, above [`MAX_ENTRY_ID`], or
/// repeats an earlier one.
pub fn assign_missing_ids(resume: &mut ResumeData, ids: &IdGenerator) {
    fn fix<T>(entries: &mut [T], ids: &IdGenerator, id_of: impl Fn(&mut T) -> &mut u64) {
        let mut seen = HashSet::new();
        for entry in entries.iter_mut() {
            let id = id_of(entry);
            if *id == 0 || *id > MAX_ENTRY_ID || !seen.insert(*id) {
                *id = ids.next_id();
                seen.insert(*id);
            } else {
                ids.observe(*id);
            }
        }
    }

    fix(&mut resume.education, ids, |e| &mut e.id);
    fix(&mut resume.experience, ids, |e| &mut e.id);
    fix(&mut resume.skills, ids, |e| &mut e.id);
    fix(&mut resume.certifications, ids, |e| &mut e.id);
    fix(&mut resume.achievements, ids, |e| &mut e.id);
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// Collections the editor can append to or remove from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySection {
    Education,
    Experience,
    Skills,
    Certifications,
    Achievements,
}

impl FromStr for EntrySection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "education" => Ok(EntrySection::Education),
            "experience" => Ok(EntrySection::Experience),
            "skills" => Ok(EntrySection::Skills),
            "certifications" => Ok(EntrySection::Certifications),
            "achievements" => Ok(EntrySection::Achievements),
            other => Err(AppError::NotFound(format!("Unknown resume section '{other}'"))),
        }
    }
}

fn parse_entry<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    serde_json::from_value(value)
        .map_err(|e| AppError::UnprocessableEntity(format!("Invalid entry: {e}")))
}

fn remove_by_id<T>(entries: &mut Vec<T>, id: u64, id_of: impl Fn(&T) -> u64) -> bool {
    let before = entries.len();
    entries.retain(|e| id_of(e) != id);
    entries.len() != before
}

// ────────────────────────────────────────────────────────────────────────────
// Store
// ────────────────────────────────────────────────────────────────────────────

pub struct DraftStore {
    draft: RwLock<Draft>,
    ids: IdGenerator,
    cache_path: Option<PathBuf>,
}

impl DraftStore {
    /// Opens the store, restoring the cached draft when one is readable.
    pub fn open(cache_path: Option<PathBuf>, default_theme: Theme) -> Self {
        let ids = IdGenerator::default();
        let draft = match cache_path.as_deref().and_then(read_cache) {
            Some(mut cached) => {
                assign_missing_ids(&mut cached.resume, &ids);
                info!("Restored cached draft (theme {})", cached.theme);
                cached
            }
            None => Draft {
                resume: ResumeData::default(),
                theme: default_theme,
            },
        };

        Self {
            draft: RwLock::new(draft),
            ids,
            cache_path,
        }
    }

    pub async fn current(&self) -> Draft {
        self.draft.read().await.clone()
    }

    pub async fn replace_resume(&self, resume: ResumeData) -> Result<Draft, AppError> {
        self.update(|draft, ids| {
            let mut resume = resume;
            assign_missing_ids(&mut resume, ids);
            draft.resume = resume;
            Ok(())
        })
        .await
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<Draft, AppError> {
        self.update(|draft, _| {
            draft.theme = theme;
            Ok(())
        })
        .await
    }

    pub async fn load_sample(&self) -> Result<Draft, AppError> {
        self.update(|draft, ids| {
            draft.resume = sample_resume(ids);
            Ok(())
        })
        .await
    }

    /// Restores the empty resume. The selected theme is kept.
    pub async fn reset(&self) -> Result<Draft, AppError> {
        self.update(|draft, _| {
            draft.resume = ResumeData::default();
            Ok(())
        })
        .await
    }

    /// Appends an entry to `section`, assigning it a fresh id.
    pub async fn add_entry(&self, section: EntrySection, entry: Value) -> Result<Draft, AppError> {
        self.update(|draft, ids| {
            let resume = &mut draft.resume;
            let id = ids.next_id();
            match section {
                EntrySection::Education => {
                    let mut e: Education = parse_entry(entry)?;
                    e.id = id;
                    resume.education.push(e);
                }
                EntrySection::Experience => {
                    let mut e: Experience = parse_entry(entry)?;
                    e.id = id;
                    resume.experience.push(e);
                }
                EntrySection::Skills => {
                    let mut e: Skill = parse_entry(entry)?;
                    e.id = id;
                    resume.skills.push(e);
                }
                EntrySection::Certifications => {
                    let mut e: Certification = parse_entry(entry)?;
                    e.id = id;
                    resume.certifications.push(e);
                }
                EntrySection::Achievements => {
                    let mut e: Achievement = parse_entry(entry)?;
                    e.id = id;
                    resume.achievements.push(e);
                }
            }
            Ok(())
        })
        .await
    }

    pub async fn remove_entry(&self, section: EntrySection, id: u64) -> Result<Draft, AppError> {
        self.update(|draft, _| {
            let resume = &mut draft.resume;
            let removed = match section {
                EntrySection::Education => remove_by_id(&mut resume.education, id, |e| e.id),
                EntrySection::Experience => remove_by_id(&mut resume.experience, id, |e| e.id),
                EntrySection::Skills => remove_by_id(&mut resume.skills, id, |e| e.id),
                EntrySection::Certifications => {
                    remove_by_id(&mut resume.certifications, id, |e| e.id)
                }
                EntrySection::Achievements => remove_by_id(&mut resume.achievements, id, |e| e.id),
            };
            if removed {
                Ok(())
            } else {
                Err(AppError::NotFound(format!("Entry {id} not found")))
            }
        })
        .await
    }

    /// Applies `f` to a copy of the draft and swaps the copy in on success.
    /// The write lock is held through the cache write so files land in order.
    async fn update<F>(&self, f: F) -> Result<Draft, AppError>
    where
        F: FnOnce(&mut Draft, &IdGenerator) -> Result<(), AppError>,
    {
        let mut guard = self.draft.write().await;
        let mut next = guard.clone();
        f(&mut next, &self.ids)?;
        *guard = next.clone();
        self.persist(&next).await;
        Ok(next)
    }

    async fn persist(&self, draft: &Draft) {
        let Some(path) = self.cache_path.clone() else {
            return;
        };
        let bytes = match serde_json::to_vec_pretty(draft) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Could not serialize draft for caching: {e}");
                return;
            }
        };
        match tokio::task::spawn_blocking(move || write_atomically(&path, &bytes)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Draft cache write failed: {e:#}"),
            Err(e) => warn!("Draft cache task failed: {e}"),
        }
    }
}

#[async_trait]
impl SnapshotSource for DraftStore {
    async fn snapshot(&self) -> Result<ResumeSnapshot, ExportError> {
        let draft = self.current().await;
        Ok(ResumeSnapshot {
            resume: draft.resume,
            theme: draft.theme,
        })
    }
}

fn read_cache(path: &Path) -> Option<Draft> {
    let raw = match std::fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!("Ignoring unreadable draft cache {}: {e}", path.display());
            return None;
        }
    };
    match serde_json::from_slice(&raw) {
        Ok(draft) => Some(draft),
        Err(e) => {
            warn!("Ignoring malformed draft cache {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_ids_are_time_based_and_increasing() {
        let ids = IdGenerator::default();
        let before = Utc::now().timestamp_millis() as u64;
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(a >= before);
        assert!(b > a);
    }

    #[test]
    fn test_observe_pushes_ids_forward() {
        let ids = IdGenerator::default();
        let far_future = MAX_ENTRY_ID - 10;
        ids.observe(far_future);
        assert_eq!(ids.next_id(), far_future + 1);
    }

    #[test]
    fn test_observe_ignores_ids_past_ceiling() {
        let ids = IdGenerator::default();
        ids.observe(u64::MAX);
        let next = ids.next_id();
        assert!(next <= MAX_ENTRY_ID);
        assert!(ids.next_id() > next);
    }

    #[tokio::test]
    async fn test_oversized_client_id_is_reassigned() {
        let store = DraftStore::open(None, Theme::Professional);
        let draft = store
            .replace_resume(ResumeData {
                skills: vec![Skill {
                    id: u64::MAX,
                    name: "Rust".to_string(),
                    ..Default::default()
                }],
                ..Default::default()
            })
            .await
            .unwrap();
        let kept = draft.resume.skills[0].id;
        assert!(kept != 0 && kept <= MAX_ENTRY_ID);

        let draft = store
            .add_entry(EntrySection::Skills, json!({ "name": "Go" }))
            .await
            .unwrap();
        assert_eq!(draft.resume.skills.len(), 2);
        assert!(draft.resume.skills[1].id > kept);
        assert!(store.load_sample().await.is_ok());
    }

    #[test]
    fn test_assign_missing_ids_fixes_zero_and_duplicates() {
        let ids = IdGenerator::default();
        let mut resume = ResumeData {
            skills: vec![
                Skill { id: 7, ..Default::default() },
                Skill { id: 7, ..Default::default() },
                Skill { id: 0, ..Default::default() },
            ],
            ..Default::default()
        };
        assign_missing_ids(&mut resume, &ids);
        let unique: HashSet<_> = resume.skills.iter().map(|s| s.id).collect();
        assert_eq!(unique.len(), 3);
        assert_eq!(resume.skills[0].id, 7);
        assert!(!unique.contains(&0));
    }

    #[tokio::test]
    async fn test_add_and_remove_entries() {
        let store = DraftStore::open(None, Theme::Professional);
        let draft = store
            .add_entry(
                EntrySection::Experience,
                json!({ "position": "Engineer", "responsibilities": ["Ship"] }),
            )
            .await
            .unwrap();
        let id = draft.resume.experience[0].id;
        assert_ne!(id, 0);

        let err = store.remove_entry(EntrySection::Skills, id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let draft = store.remove_entry(EntrySection::Experience, id).await.unwrap();
        assert!(draft.resume.experience.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_entry_leaves_draft_untouched() {
        let store = DraftStore::open(None, Theme::Professional);
        let err = store
            .add_entry(EntrySection::Skills, json!({ "name": ["not", "a", "string"] }))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
        assert!(store.current().await.resume.skills.is_empty());
    }

    #[tokio::test]
    async fn test_reset_keeps_theme() {
        let store = DraftStore::open(None, Theme::Google);
        store.load_sample().await.unwrap();
        let draft = store.reset().await.unwrap();
        assert!(draft.resume.is_blank());
        assert_eq!(draft.theme, Theme::Google);
    }

    #[tokio::test]
    async fn test_snapshot_unaffected_by_later_edits() {
        let store = DraftStore::open(None, Theme::Dark);
        store.load_sample().await.unwrap();
        let snapshot = store.snapshot().await.unwrap();

        store
            .replace_resume(ResumeData {
                experience: vec![Experience {
                    position: "Changed".to_string(),
                    ..Default::default()
                }],
                ..Default::default()
            })
            .await
            .unwrap();
        store.set_theme(Theme::Amazon).await.unwrap();

        assert_eq!(snapshot.theme, Theme::Dark);
        assert_eq!(snapshot.resume.owner_name(), "Alex Johnson");
    }

    #[tokio::test]
    async fn test_cache_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");

        let store = DraftStore::open(Some(path.clone()), Theme::Professional);
        store.load_sample().await.unwrap();
        store.set_theme(Theme::Netflix).await.unwrap();
        let saved = store.current().await;

        let reopened = DraftStore::open(Some(path), Theme::Professional);
        assert_eq!(reopened.current().await, saved);
    }

    #[tokio::test]
    async fn test_malformed_cache_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let store = DraftStore::open(Some(path), Theme::Dark);
        let draft = store.current().await;
        assert!(draft.resume.is_blank());
        assert_eq!(draft.theme, Theme::Dark);
    }

    #[tokio::test]
    async fn test_unwritable_cache_does_not_fail_requests() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        let store = DraftStore::open(Some(blocker.join("draft.json")), Theme::Dark);
        assert!(store.load_sample().await.is_ok());
    }
}
