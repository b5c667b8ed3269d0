// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::Connection as _;

use setlist_core::{Playlist, PlaylistWithEntriesSummary};
use setlist_repo::{
    playlist::{RecordHeader, RecordId},
    prelude::{Pagination, PaginationLimit, PaginationOffset},
    track::RecordId as TrackId,
};
use setlist_usecases::{
    self as uc,
    playlist::{PlaylistWithTracks, UpdateParams},
};

use crate::prelude::*;

/// Load a single playlist including all tracks ordered by position
pub async fn get(
    db_gatekeeper: &Gatekeeper,
    id: RecordId,
) -> Result<(RecordHeader, PlaylistWithTracks)> {
    db_gatekeeper
        .spawn_blocking_task(move |mut pooled_connection, _abort_flag| {
            let connection = &mut *pooled_connection;
            connection.transaction::<_, Error, _>(|connection| {
                setlist_usecases_sqlite::playlist::load_one_with_tracks(connection, id)
            })
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}

/// Load playlists ordered by id, each with a summary of their entries
///
/// Both `offset` and `count` being 0 loads all playlists.
pub async fn list(
    db_gatekeeper: &Gatekeeper,
    offset: PaginationOffset,
    count: PaginationLimit,
) -> Result<Vec<(RecordHeader, PlaylistWithEntriesSummary)>> {
    let pagination = Pagination::from_offset_count(offset, count);
    db_gatekeeper
        .spawn_blocking_task(move |mut pooled_connection, _abort_flag| {
            let connection = &mut *pooled_connection;
            connection.transaction::<_, Error, _>(|connection| {
                setlist_usecases_sqlite::playlist::load_all_with_entries_summary(
                    connection,
                    Some(&pagination),
                )
            })
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}

pub async fn count(db_gatekeeper: &Gatekeeper) -> Result<u64> {
    db_gatekeeper
        .spawn_blocking_task(move |mut pooled_connection, _abort_flag| {
            setlist_usecases_sqlite::playlist::count(&mut pooled_connection)
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}

/// Create a new playlist with the given tracks in the given order
///
/// The input is validated before accessing the database.
pub async fn create(
    db_gatekeeper: &Gatekeeper,
    new_playlist: Playlist,
    track_ids: Vec<TrackId>,
) -> Result<RecordId> {
    let validated_input = uc::playlist::validate_input(new_playlist)?;
    db_gatekeeper
        .spawn_blocking_task(move |mut pooled_connection, _abort_flag| {
            let connection = &mut *pooled_connection;
            connection.transaction::<_, Error, _>(|connection| {
                setlist_usecases_sqlite::playlist::create(connection, &validated_input, &track_ids)
            })
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}

/// Modify the properties and entries of a playlist atomically
///
/// Nothing is stored if no modifications are requested, not even
/// the existence of the playlist is checked.
pub async fn update(db_gatekeeper: &Gatekeeper, id: RecordId, params: UpdateParams) -> Result<()> {
    let params = uc::playlist::validate_update_params(params)?;
    if params.is_empty() {
        log::debug!("Nothing to update for playlist {id}");
        return Ok(());
    }
    db_gatekeeper
        .spawn_blocking_task(move |mut pooled_connection, abort_flag| {
            let connection = &mut *pooled_connection;
            connection.transaction::<_, Error, _>(|connection| {
                setlist_usecases_sqlite::playlist::update(connection, id, &params, &abort_flag)
            })
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}

/// Delete a playlist including all entries
pub async fn delete(db_gatekeeper: &Gatekeeper, id: RecordId) -> Result<()> {
    db_gatekeeper
        .spawn_blocking_task(move |mut pooled_connection, _abort_flag| {
            let connection = &mut *pooled_connection;
            connection.transaction::<_, Error, _>(|connection| {
                setlist_usecases_sqlite::playlist::purge(connection, id)
            })
        })
        .await
        .map_err(Into::into)
        .unwrap_or_else(Err)
}
