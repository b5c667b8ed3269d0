// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use setlist_core::Track;
use setlist_repo::track::{EntityRepo as _, RecordHeader, RecordId};
use setlist_repo_sqlite::DbConnection;

use super::*;

pub fn create(
    connection: &mut DbConnection,
    validated_input: &uc::track::ValidatedInput,
) -> Result<RecordId> {
    let mut repo = RepoConnection::new(connection);
    uc::track::store_created(&mut repo, validated_input).map_err(Into::into)
}

pub fn load_one(connection: &mut DbConnection, id: RecordId) -> Result<(RecordHeader, Track)> {
    let mut repo = RepoConnection::new(connection);
    repo.load_track(id).map_err(Into::into)
}
