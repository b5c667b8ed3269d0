// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use anyhow::anyhow;

use setlist_core::{
    EntriesSummary, Playlist, PlaylistWithEntriesSummary, playlist::Position,
    util::clock::UtcDateTimeSecs,
};

use crate::{prelude::*, track::RecordId as TrackId};

record_id_newtype!(RecordId);

pub type RecordHeader = crate::RecordHeader<RecordId>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    pub position: Position,
    pub track_id: TrackId,
}

/// Selective modification of the stored properties
///
/// Fields that are `None` remain unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaylistChanges<'a> {
    pub name: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
    pub public: Option<bool>,
}

pub trait EntityRepo: EntryRepo {
    fn insert_playlist(
        &mut self,
        created_at: UtcDateTimeSecs,
        created_playlist: &Playlist,
    ) -> RepoResult<RecordId>;

    /// Apply the changes and bump the update time stamp
    ///
    /// Fails with [`RepoError::NotFound`] if the playlist doesn't
    /// exist, even if there are no changes.
    fn update_playlist(
        &mut self,
        id: RecordId,
        updated_at: UtcDateTimeSecs,
        changes: PlaylistChanges<'_>,
    ) -> RepoResult<()>;

    fn load_playlist(&mut self, id: RecordId) -> RepoResult<(RecordHeader, Playlist)>;

    fn load_playlist_with_entries_summary(
        &mut self,
        id: RecordId,
    ) -> RepoResult<(RecordHeader, PlaylistWithEntriesSummary)> {
        let (record_header, playlist) = self.load_playlist(id)?;
        let entries = self.load_playlist_entries_summary(id)?;
        Ok((record_header, PlaylistWithEntriesSummary { playlist, entries }))
    }

    /// Load playlists ordered by id
    fn load_playlists_with_entries_summary(
        &mut self,
        pagination: Option<&Pagination>,
        collector: &mut dyn ReservableRecordCollector<
            Header = RecordHeader,
            Record = PlaylistWithEntriesSummary,
        >,
    ) -> RepoResult<()>;

    fn count_playlists(&mut self) -> RepoResult<u64>;

    /// Delete the playlist including all entries
    fn purge_playlist(&mut self, id: RecordId) -> RepoResult<()>;
}

pub trait EntryRepo {
    /// Load all entries ordered by position
    fn load_playlist_entries(&mut self, playlist_id: RecordId) -> RepoResult<Vec<Entry>>;

    fn count_playlist_entries(&mut self, playlist_id: RecordId) -> RepoResult<usize>;

    fn load_playlist_entries_summary(&mut self, playlist_id: RecordId)
    -> RepoResult<EntriesSummary>;

    /// Fails with [`RepoError::NotFound`] if there is no entry
    /// at the given position.
    fn load_playlist_entry_track_id(
        &mut self,
        playlist_id: RecordId,
        position: Position,
    ) -> RepoResult<TrackId>;

    /// Append new entries after the last position, preserving the order
    fn append_playlist_entries(
        &mut self,
        playlist_id: RecordId,
        track_ids: &[TrackId],
    ) -> RepoResult<()>;

    /// Insert a single entry
    ///
    /// All entries at or after `position` are shifted up by one. Positions
    /// beyond the end are clamped, i.e. the entry is appended.
    fn insert_playlist_entry(
        &mut self,
        playlist_id: RecordId,
        position: Position,
        track_id: TrackId,
    ) -> RepoResult<()>;

    /// Remove a single entry
    ///
    /// All entries after `position` are shifted down by one. Returns the
    /// number of removed entries, i.e. 0 if there is no entry at `position`.
    fn remove_playlist_entry(
        &mut self,
        playlist_id: RecordId,
        position: Position,
    ) -> RepoResult<usize>;

    /// Remove multiple entries by their current positions
    ///
    /// The positions all refer to the position space before the removal.
    /// They are processed in descending order so that shifting the tail
    /// never affects a pending removal. Duplicates are ignored.
    fn remove_playlist_entries(
        &mut self,
        playlist_id: RecordId,
        positions: &[Position],
    ) -> RepoResult<usize> {
        let mut positions = positions.to_vec();
        positions.sort_unstable_by(|lhs, rhs| rhs.cmp(lhs));
        positions.dedup();
        let mut removed_count = 0;
        for position in positions {
            removed_count += self.remove_playlist_entry(playlist_id, position)?;
        }
        Ok(removed_count)
    }

    fn remove_all_playlist_entries(&mut self, playlist_id: RecordId) -> RepoResult<usize>;

    /// Move a single entry
    ///
    /// `to` refers to the position space after the entry has been removed
    /// from `from`.
    fn move_playlist_entry(
        &mut self,
        playlist_id: RecordId,
        from: Position,
        to: Position,
    ) -> RepoResult<()> {
        if from == to {
            return Ok(());
        }
        // A missing entry is not reported as `NotFound` which
        // is reserved for the playlist itself.
        let track_id = self
            .load_playlist_entry_track_id(playlist_id, from)
            .optional()?
            .ok_or_else(|| anyhow!("no entry at position {from} in playlist {playlist_id}"))?;
        let context =
            move || format!("failed to move entry from {from} to {to} in playlist {playlist_id}");
        let removed_count = self
            .remove_playlist_entry(playlist_id, from)
            .map_err(|err| err.with_context(context))?;
        debug_assert_eq!(1, removed_count);
        self.insert_playlist_entry(playlist_id, to, track_id)
            .map_err(|err| err.with_context(context))
    }
}

#[cfg(test)]
mod tests;
