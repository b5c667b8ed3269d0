// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

const PLAYLIST_ID: RecordId = RecordId::new(1);

/// Entries of a single playlist, indexed by position
#[derive(Debug, Default)]
struct VecEntryRepo {
    track_ids: Vec<TrackId>,
}

impl VecEntryRepo {
    fn new(track_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            track_ids: track_ids.into_iter().map(TrackId::new).collect(),
        }
    }

    fn track_ids(&self) -> Vec<i64> {
        self.track_ids.iter().copied().map(TrackId::to_inner).collect()
    }
}

impl EntryRepo for VecEntryRepo {
    fn load_playlist_entries(&mut self, playlist_id: RecordId) -> RepoResult<Vec<Entry>> {
        assert_eq!(PLAYLIST_ID, playlist_id);
        Ok(self
            .track_ids
            .iter()
            .enumerate()
            .map(|(position, track_id)| Entry {
                position,
                track_id: *track_id,
            })
            .collect())
    }

    fn count_playlist_entries(&mut self, _playlist_id: RecordId) -> RepoResult<usize> {
        Ok(self.track_ids.len())
    }

    fn load_playlist_entries_summary(
        &mut self,
        _playlist_id: RecordId,
    ) -> RepoResult<EntriesSummary> {
        Ok(EntriesSummary {
            tracks_count: self.track_ids.len(),
            duration: Default::default(),
        })
    }

    fn load_playlist_entry_track_id(
        &mut self,
        _playlist_id: RecordId,
        position: Position,
    ) -> RepoResult<TrackId> {
        self.track_ids
            .get(position)
            .copied()
            .ok_or(RepoError::NotFound)
    }

    fn append_playlist_entries(
        &mut self,
        _playlist_id: RecordId,
        track_ids: &[TrackId],
    ) -> RepoResult<()> {
        self.track_ids.extend_from_slice(track_ids);
        Ok(())
    }

    fn insert_playlist_entry(
        &mut self,
        _playlist_id: RecordId,
        position: Position,
        track_id: TrackId,
    ) -> RepoResult<()> {
        let position = position.min(self.track_ids.len());
        self.track_ids.insert(position, track_id);
        Ok(())
    }

    fn remove_playlist_entry(
        &mut self,
        _playlist_id: RecordId,
        position: Position,
    ) -> RepoResult<usize> {
        if position >= self.track_ids.len() {
            return Ok(0);
        }
        self.track_ids.remove(position);
        Ok(1)
    }

    fn remove_all_playlist_entries(&mut self, _playlist_id: RecordId) -> RepoResult<usize> {
        let removed_count = self.track_ids.len();
        self.track_ids.clear();
        Ok(removed_count)
    }
}

#[test]
fn remove_multiple_entries_in_descending_order() -> RepoResult<()> {
    let mut repo = VecEntryRepo::new([10, 11, 12, 13, 14]);
    let removed_count = repo.remove_playlist_entries(PLAYLIST_ID, &[1, 3])?;
    assert_eq!(2, removed_count);
    assert_eq!(vec![10, 12, 14], repo.track_ids());
    Ok(())
}

#[test]
fn remove_multiple_entries_ignores_duplicates_and_missing_positions() -> RepoResult<()> {
    let mut repo = VecEntryRepo::new([10, 11, 12]);
    let removed_count = repo.remove_playlist_entries(PLAYLIST_ID, &[0, 7, 0, 2])?;
    assert_eq!(2, removed_count);
    assert_eq!(vec![11], repo.track_ids());
    Ok(())
}

#[test]
fn move_entry_forward() -> RepoResult<()> {
    let mut repo = VecEntryRepo::new([1, 2, 3, 4]);
    repo.move_playlist_entry(PLAYLIST_ID, 0, 2)?;
    assert_eq!(vec![2, 3, 1, 4], repo.track_ids());
    Ok(())
}

#[test]
fn move_entry_backward() -> RepoResult<()> {
    let mut repo = VecEntryRepo::new([1, 2, 3, 4]);
    repo.move_playlist_entry(PLAYLIST_ID, 3, 1)?;
    assert_eq!(vec![1, 4, 2, 3], repo.track_ids());
    Ok(())
}

#[test]
fn move_entry_to_same_position_is_a_no_op() -> RepoResult<()> {
    let mut repo = VecEntryRepo::new([1, 2]);
    repo.move_playlist_entry(PLAYLIST_ID, 1, 1)?;
    assert_eq!(vec![1, 2], repo.track_ids());
    Ok(())
}

#[test]
fn move_missing_entry_fails_without_not_found() {
    let mut repo = VecEntryRepo::new([1, 2]);
    let err = repo.move_playlist_entry(PLAYLIST_ID, 5, 0).unwrap_err();
    assert!(matches!(err, RepoError::Other(_)));
    assert_eq!(vec![1, 2], repo.track_ids());
}
