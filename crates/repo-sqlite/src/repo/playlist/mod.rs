// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::time::Duration;

use diesel::{
    dsl::{count_star, max, sql},
    sql_types::{BigInt, Nullable},
};

use setlist_core::{
    EntriesSummary, Playlist, PlaylistWithEntriesSummary, playlist::Position,
    util::clock::UtcDateTimeSecs,
};
use setlist_repo::{playlist::*, track::RecordId as TrackId};

use crate::{
    db::{
        playlist::{models::*, schema::*},
        playlist_entry::{models as entry_models, schema::*},
        track::{models::duration_from_millis, schema::*},
    },
    prelude::*,
    util::*,
};

impl EntityRepo for crate::prelude::Connection<'_> {
    fn insert_playlist(
        &mut self,
        created_at: UtcDateTimeSecs,
        created_playlist: &Playlist,
    ) -> RepoResult<RecordId> {
        let insertable = InsertableRecord::bind(created_at, created_playlist);
        let query = diesel::insert_into(playlist::table)
            .values(&insertable)
            .returning(playlist::row_id);
        let row_id = query
            .get_result::<RowId>(self.as_mut())
            .map_err(repo_error_with_context(|| "failed to insert playlist"))?;
        Ok(row_id.into())
    }

    fn update_playlist(
        &mut self,
        id: RecordId,
        updated_at: UtcDateTimeSecs,
        changes: PlaylistChanges<'_>,
    ) -> RepoResult<()> {
        let updatable = UpdatableRecord::bind(updated_at, changes);
        let target = playlist::table.filter(playlist::row_id.eq(RowId::from(id)));
        let query = diesel::update(target).set(&updatable);
        let rows_affected: usize = query
            .execute(self.as_mut())
            .map_err(repo_error_with_context(|| format!("failed to update playlist {id}")))?;
        debug_assert!(rows_affected <= 1);
        if rows_affected < 1 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    fn load_playlist(&mut self, id: RecordId) -> RepoResult<(RecordHeader, Playlist)> {
        playlist::table
            .filter(playlist::row_id.eq(RowId::from(id)))
            .select(QueryableRecord::as_select())
            .first(self.as_mut())
            .map_err(repo_error)
            .map(Into::into)
    }

    fn load_playlists_with_entries_summary(
        &mut self,
        pagination: Option<&Pagination>,
        collector: &mut dyn ReservableRecordCollector<
            Header = RecordHeader,
            Record = PlaylistWithEntriesSummary,
        >,
    ) -> RepoResult<()> {
        let mut target = playlist::table
            .order_by(playlist::row_id)
            .select(QueryableRecord::as_select())
            .into_boxed();

        // Pagination
        if let Some(pagination) = pagination.filter(|pagination| pagination.is_paginated()) {
            // SQLite: OFFSET can only be used in conjunction with LIMIT
            let limit = i64::try_from(pagination.mandatory_limit()).unwrap_or(i64::MAX);
            target = target.limit(limit);
            if let Some(offset) = pagination.offset {
                let offset = i64::try_from(offset).unwrap_or(i64::MAX);
                target = target.offset(offset);
            }
        }

        let records = target
            .load::<QueryableRecord>(self.as_mut())
            .map_err(repo_error_with_context(|| "failed to load playlists"))?;
        if records.is_empty() {
            return Ok(());
        }

        let row_ids: Vec<RowId> = records.iter().map(|record| record.row_id).collect();
        let mut summaries = load_entries_summaries(self, &row_ids)?.into_iter().peekable();

        collector.reserve(records.len());
        for record in records {
            let (record_header, playlist): (RecordHeader, Playlist) = record.into();
            // Both sequences are ordered by playlist id
            let entries = summaries
                .next_if(|(row_id, _)| *row_id == RowId::from(record_header.id))
                .map(|(_, summary)| summary)
                .unwrap_or_default();
            collector.collect(record_header, PlaylistWithEntriesSummary { playlist, entries });
        }
        Ok(())
    }

    fn count_playlists(&mut self) -> RepoResult<u64> {
        let count = playlist::table
            .select(count_star())
            .first::<i64>(self.as_mut())
            .optional()
            .map_err(repo_error)?
            .ok_or_else(|| anyhow::anyhow!("no result when counting playlists"))?;
        debug_assert!(count >= 0);
        Ok(count as u64)
    }

    fn purge_playlist(&mut self, id: RecordId) -> RepoResult<()> {
        let target = playlist::table.filter(playlist::row_id.eq(RowId::from(id)));
        let query = diesel::delete(target);
        let rows_affected: usize = query
            .execute(self.as_mut())
            .map_err(repo_error_with_context(|| format!("failed to purge playlist {id}")))?;
        debug_assert!(rows_affected <= 1);
        if rows_affected < 1 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

// Limits the number of bound variables per query
const LOAD_ENTRIES_SUMMARIES_CHUNK_SIZE: usize = 500;

/// Summaries of all given playlists that have entries, ordered by playlist id
///
/// `row_ids` must be sorted in ascending order.
fn load_entries_summaries(
    db: &mut crate::prelude::Connection<'_>,
    row_ids: &[RowId],
) -> RepoResult<Vec<(RowId, EntriesSummary)>> {
    debug_assert!(row_ids.is_sorted());
    let mut summaries = Vec::with_capacity(row_ids.len());
    for chunk in row_ids.chunks(LOAD_ENTRIES_SUMMARIES_CHUNK_SIZE) {
        // diesel::dsl::sum() would result in a Numeric that is not supported by SQLite
        let rows = playlist_entry::table
            .inner_join(track::table)
            .filter(playlist_entry::playlist_id.eq_any(chunk.iter().copied()))
            .group_by(playlist_entry::playlist_id)
            .select((
                playlist_entry::playlist_id,
                count_star(),
                sql::<Nullable<BigInt>>("SUM(track.duration_ms)"),
            ))
            .order_by(playlist_entry::playlist_id)
            .load::<(RowId, i64, Option<i64>)>(db.as_mut())
            .map_err(repo_error_with_context(|| "failed to summarize playlist entries"))?;
        summaries.extend(rows.into_iter().map(|(row_id, tracks_count, duration_ms)| {
            (row_id, entries_summary(tracks_count, duration_ms))
        }));
    }
    Ok(summaries)
}

fn entries_summary(tracks_count: i64, duration_ms: Option<i64>) -> EntriesSummary {
    debug_assert!(tracks_count >= 0);
    EntriesSummary {
        tracks_count: tracks_count as usize,
        duration: duration_ms.map_or(Duration::ZERO, duration_from_millis),
    }
}

fn max_playlist_entry_position(
    db: &mut crate::prelude::Connection<'_>,
    playlist_id: RecordId,
) -> RepoResult<Option<i64>> {
    playlist_entry::table
        .select(max(playlist_entry::position))
        .filter(playlist_entry::playlist_id.eq(RowId::from(playlist_id)))
        .first::<Option<i64>>(db.as_mut())
        .map_err(repo_error_with_context(|| {
            format!("failed to determine last position of playlist {playlist_id}")
        }))
}

/// Shift the positions of all entries at or after `min_position` by `delta`
///
/// The primary key `(playlist_id, position)` is checked for every single
/// row during an update. Moving all affected rows into the negative range
/// first and then back into their final positions avoids any transient
/// collisions, independent of the order in which the rows are visited.
///
/// The resulting positions must not become negative.
fn shift_playlist_entries(
    db: &mut crate::prelude::Connection<'_>,
    playlist_id: RecordId,
    min_position: i64,
    delta: i64,
) -> RepoResult<usize> {
    debug_assert!(min_position >= 0);
    debug_assert!(min_position + delta >= 0);
    if delta == 0 {
        return Ok(0);
    }
    let context = move || {
        format!(
            "failed to shift entries from position {min_position} by {delta} in playlist \
             {playlist_id}"
        )
    };
    let playlist_id = RowId::from(playlist_id);
    // p -> -(p + delta) - 1
    let rows_negated = diesel::update(
        playlist_entry::table
            .filter(playlist_entry::playlist_id.eq(playlist_id))
            .filter(playlist_entry::position.ge(min_position)),
    )
    .set(playlist_entry::position.eq(playlist_entry::position * -1_i64 - (delta + 1)))
    .execute(db.as_mut())
    .map_err(repo_error_with_context(context))?;
    if rows_negated == 0 {
        return Ok(0);
    }
    // -(p + delta) - 1 -> p + delta
    let rows_restored = diesel::update(
        playlist_entry::table
            .filter(playlist_entry::playlist_id.eq(playlist_id))
            .filter(playlist_entry::position.lt(0_i64)),
    )
    .set(playlist_entry::position.eq(playlist_entry::position * -1_i64 - 1_i64))
    .execute(db.as_mut())
    .map_err(repo_error_with_context(context))?;
    debug_assert_eq!(rows_negated, rows_restored);
    Ok(rows_restored)
}

fn insert_playlist_entry_record(
    db: &mut crate::prelude::Connection<'_>,
    playlist_id: RecordId,
    position: Position,
    track_id: TrackId,
) -> RepoResult<()> {
    let insertable = entry_models::InsertableRecord::bind(playlist_id, position, track_id);
    let rows_affected = diesel::insert_into(playlist_entry::table)
        .values(&insertable)
        .execute(db.as_mut())
        .map_err(repo_error_with_context(|| {
            format!(
                "failed to insert track {track_id} at position {position} in playlist {playlist_id}"
            )
        }))?;
    debug_assert_eq!(1, rows_affected);
    Ok(())
}

impl EntryRepo for crate::prelude::Connection<'_> {
    fn load_playlist_entries(&mut self, playlist_id: RecordId) -> RepoResult<Vec<Entry>> {
        let records = playlist_entry::table
            .select((playlist_entry::position, playlist_entry::track_id))
            .filter(playlist_entry::playlist_id.eq(RowId::from(playlist_id)))
            .order_by(playlist_entry::position)
            .load::<entry_models::QueryableRecord>(self.as_mut())
            .map_err(repo_error)?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    fn count_playlist_entries(&mut self, playlist_id: RecordId) -> RepoResult<usize> {
        playlist_entry::table
            .filter(playlist_entry::playlist_id.eq(RowId::from(playlist_id)))
            .select(count_star())
            .first::<i64>(self.as_mut())
            .map(|count| count as usize)
            .map_err(repo_error)
    }

    fn load_playlist_entries_summary(
        &mut self,
        playlist_id: RecordId,
    ) -> RepoResult<EntriesSummary> {
        // diesel::dsl::sum() would result in a Numeric that is not supported by SQLite
        let (tracks_count, duration_ms) = playlist_entry::table
            .inner_join(track::table)
            .filter(playlist_entry::playlist_id.eq(RowId::from(playlist_id)))
            .select((
                count_star(),
                sql::<Nullable<BigInt>>("SUM(track.duration_ms)"),
            ))
            .first::<(i64, Option<i64>)>(self.as_mut())
            .map_err(repo_error_with_context(|| {
                format!("failed to summarize entries of playlist {playlist_id}")
            }))?;
        Ok(entries_summary(tracks_count, duration_ms))
    }

    fn load_playlist_entry_track_id(
        &mut self,
        playlist_id: RecordId,
        position: Position,
    ) -> RepoResult<TrackId> {
        playlist_entry::table
            .select(playlist_entry::track_id)
            .filter(playlist_entry::playlist_id.eq(RowId::from(playlist_id)))
            .filter(playlist_entry::position.eq(position_to_sql(position)))
            .first::<RowId>(self.as_mut())
            .map(Into::into)
            .map_err(repo_error)
    }

    fn append_playlist_entries(
        &mut self,
        playlist_id: RecordId,
        track_ids: &[TrackId],
    ) -> RepoResult<()> {
        if track_ids.is_empty() {
            return Ok(());
        }
        let next_position = max_playlist_entry_position(self, playlist_id)?
            .map_or(0, |max_position| position_from_sql(max_position) + 1);
        for (index, track_id) in track_ids.iter().enumerate() {
            insert_playlist_entry_record(self, playlist_id, next_position + index, *track_id)
                .map_err(|err| {
                    err.with_context(|| {
                        format!(
                            "failed to append {count} track(s) to playlist {playlist_id}",
                            count = track_ids.len()
                        )
                    })
                })?;
        }
        Ok(())
    }

    fn insert_playlist_entry(
        &mut self,
        playlist_id: RecordId,
        position: Position,
        track_id: TrackId,
    ) -> RepoResult<()> {
        let count = self.count_playlist_entries(playlist_id)?;
        let position = position.min(count);
        if position < count {
            let rows_shifted =
                shift_playlist_entries(self, playlist_id, position_to_sql(position), 1).map_err(
                    |err| {
                        err.with_context(|| {
                            format!(
                                "failed to create gap at position {position} in playlist {playlist_id}"
                            )
                        })
                    },
                )?;
            debug_assert_eq!(count - position, rows_shifted);
        }
        insert_playlist_entry_record(self, playlist_id, position, track_id)
    }

    fn remove_playlist_entry(
        &mut self,
        playlist_id: RecordId,
        position: Position,
    ) -> RepoResult<usize> {
        let context =
            move || format!("failed to remove position {position} in playlist {playlist_id}");
        let position = position_to_sql(position);
        let rows_deleted: usize = diesel::delete(
            playlist_entry::table
                .filter(playlist_entry::playlist_id.eq(RowId::from(playlist_id)))
                .filter(playlist_entry::position.eq(position)),
        )
        .execute(self.as_mut())
        .map_err(repo_error_with_context(context))?;
        debug_assert!(rows_deleted <= 1);
        if rows_deleted > 0 {
            shift_playlist_entries(self, playlist_id, position + 1, -1)
                .map_err(|err| err.with_context(context))?;
        }
        Ok(rows_deleted)
    }

    fn remove_all_playlist_entries(&mut self, playlist_id: RecordId) -> RepoResult<usize> {
        let rows_deleted: usize = diesel::delete(
            playlist_entry::table.filter(playlist_entry::playlist_id.eq(RowId::from(playlist_id))),
        )
        .execute(self.as_mut())
        .map_err(repo_error_with_context(|| {
            format!("failed to remove all entries of playlist {playlist_id}")
        }))?;
        Ok(rows_deleted)
    }
}

#[cfg(test)]
mod tests;
