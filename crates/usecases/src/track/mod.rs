// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use semval::Validate as _;

use setlist_core::{Track, util::clock::UtcDateTimeSecs};
use setlist_repo::{
    prelude::*,
    track::{EntityRepo, RecordId},
};

use super::*;

#[derive(Debug)]
pub struct ValidatedInput(Track);

pub fn validate_input(track: Track) -> InputResult<ValidatedInput> {
    if let Err(err) = track.validate() {
        return Err(anyhow::anyhow!("Invalid track input: {err:?}").into());
    }
    Ok(ValidatedInput(track))
}

pub fn store_created<Repo>(repo: &mut Repo, validated_input: &ValidatedInput) -> RepoResult<RecordId>
where
    Repo: EntityRepo,
{
    let ValidatedInput(track) = validated_input;
    let created_at = UtcDateTimeSecs::now();
    let id = repo.insert_track(created_at, track)?;
    log::debug!("Added track {id}: {title}", title = track.title);
    Ok(id)
}
