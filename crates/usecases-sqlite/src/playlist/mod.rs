// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::atomic::AtomicBool;

use setlist_core::PlaylistWithEntriesSummary;
use setlist_repo::{
    playlist::{RecordHeader, RecordId},
    prelude::Pagination,
    track::RecordId as TrackId,
};
use setlist_repo_sqlite::DbConnection;
use uc::playlist::{PlaylistWithTracks, ValidatedInput, ValidatedUpdateParams};

use super::*;

pub fn create(
    connection: &mut DbConnection,
    validated_input: &ValidatedInput,
    track_ids: &[TrackId],
) -> Result<RecordId> {
    let mut repo = RepoConnection::new(connection);
    uc::playlist::store_created(&mut repo, validated_input, track_ids).map_err(Into::into)
}

pub fn load_one_with_tracks(
    connection: &mut DbConnection,
    id: RecordId,
) -> Result<(RecordHeader, PlaylistWithTracks)> {
    let mut repo = RepoConnection::new(connection);
    uc::playlist::load_with_tracks(&mut repo, id).map_err(Into::into)
}

pub fn load_all_with_entries_summary(
    connection: &mut DbConnection,
    pagination: Option<&Pagination>,
) -> Result<Vec<(RecordHeader, PlaylistWithEntriesSummary)>> {
    let mut repo = RepoConnection::new(connection);
    uc::playlist::load_all(&mut repo, pagination).map_err(Into::into)
}

pub fn count(connection: &mut DbConnection) -> Result<u64> {
    let mut repo = RepoConnection::new(connection);
    uc::playlist::count(&mut repo).map_err(Into::into)
}

pub fn update(
    connection: &mut DbConnection,
    id: RecordId,
    params: &ValidatedUpdateParams,
    abort_flag: &AtomicBool,
) -> Result<()> {
    let mut repo = RepoConnection::new(connection);
    uc::playlist::update(&mut repo, id, params, abort_flag).map_err(Into::into)
}

pub fn purge(connection: &mut DbConnection, id: RecordId) -> Result<()> {
    let mut repo = RepoConnection::new(connection);
    uc::playlist::purge(&mut repo, id).map_err(Into::into)
}
