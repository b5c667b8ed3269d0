// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::atomic::AtomicBool;

use hashbrown::HashMap;
use semval::Validate as _;

use setlist_core::{
    Playlist, PlaylistWithEntriesSummary, Track, playlist::Position,
    util::clock::UtcDateTimeSecs,
};
use setlist_repo::{
    playlist::{EntityRepo as PlaylistRepo, PlaylistChanges, RecordHeader, RecordId},
    prelude::*,
    track::{
        EntityRepo as TrackRepo, RecordHeader as TrackHeader, RecordId as TrackId,
    },
};

use super::*;

pub mod entries;

use self::entries::PatchOperation;

#[derive(Debug)]
pub struct ValidatedInput(Playlist);

pub fn validate_input(playlist: Playlist) -> InputResult<ValidatedInput> {
    if let Err(err) = playlist.validate() {
        return Err(anyhow::anyhow!("Invalid playlist input: {err:?}").into());
    }
    Ok(ValidatedInput(playlist))
}

/// Insert a new playlist with the given tracks in the given order
pub fn store_created<Repo>(
    repo: &mut Repo,
    validated_input: &ValidatedInput,
    track_ids: &[TrackId],
) -> RepoResult<RecordId>
where
    Repo: PlaylistRepo,
{
    let ValidatedInput(playlist) = validated_input;
    let created_at = UtcDateTimeSecs::now();
    let id = repo.insert_playlist(created_at, playlist)?;
    repo.append_playlist_entries(id, track_ids)?;
    log::debug!(
        "Created playlist {id} with {count} track(s)",
        count = track_ids.len()
    );
    Ok(id)
}

/// A playlist with all its tracks ordered by position
///
/// Tracks that appear multiple times in the playlist are
/// repeated accordingly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistWithTracks {
    pub playlist: PlaylistWithEntriesSummary,
    pub tracks: Vec<(TrackHeader, Track)>,
}

pub fn load_with_tracks<Repo>(
    repo: &mut Repo,
    id: RecordId,
) -> RepoResult<(RecordHeader, PlaylistWithTracks)>
where
    Repo: PlaylistRepo + TrackRepo,
{
    let (record_header, playlist) = repo.load_playlist_with_entries_summary(id)?;
    let entries = repo.load_playlist_entries(id)?;
    let track_ids = entries
        .iter()
        .map(|entry| entry.track_id)
        .collect::<Vec<_>>();
    let loaded_tracks = repo
        .load_tracks(&track_ids)?
        .into_iter()
        .map(|(header, track)| (header.id, (header, track)))
        .collect::<HashMap<_, _>>();
    let mut tracks = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(track) = loaded_tracks.get(&entry.track_id) else {
            log::warn!(
                "Missing track {track_id} at position {position} in playlist {id}",
                track_id = entry.track_id,
                position = entry.position,
            );
            continue;
        };
        tracks.push(track.clone());
    }
    Ok((record_header, PlaylistWithTracks { playlist, tracks }))
}

pub fn load_all<Repo>(
    repo: &mut Repo,
    pagination: Option<&Pagination>,
) -> RepoResult<Vec<(RecordHeader, PlaylistWithEntriesSummary)>>
where
    Repo: PlaylistRepo,
{
    let mut collector: Vec<(RecordHeader, PlaylistWithEntriesSummary)> = Vec::new();
    repo.load_playlists_with_entries_summary(pagination, &mut collector)?;
    Ok(collector)
}

pub fn count<Repo>(repo: &mut Repo) -> RepoResult<u64>
where
    Repo: PlaylistRepo,
{
    repo.count_playlists()
}

pub fn purge<Repo>(repo: &mut Repo, id: RecordId) -> RepoResult<()>
where
    Repo: PlaylistRepo,
{
    repo.purge_playlist(id)?;
    log::debug!("Deleted playlist {id}");
    Ok(())
}

/// Requested modifications of a playlist
///
/// The entry operations are applied in the order of the fields:
/// all tracks are removed, then tracks are removed by position,
/// then tracks are appended, and finally tracks are moved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateParams {
    pub name: Option<String>,

    /// An empty description clears the current description.
    pub description: Option<String>,

    pub public: Option<bool>,

    pub remove_all_tracks: bool,

    /// Positions before the update.
    pub remove_tracks: Vec<Position>,

    pub add_tracks: Vec<TrackId>,

    /// Pairs of `(from, to)` positions, applied one after another.
    pub move_tracks: Vec<(Position, Position)>,
}

impl UpdateParams {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let Self {
            name,
            description,
            public,
            remove_all_tracks,
            remove_tracks,
            add_tracks,
            move_tracks,
        } = self;
        name.is_none()
            && description.is_none()
            && public.is_none()
            && !remove_all_tracks
            && remove_tracks.is_empty()
            && add_tracks.is_empty()
            && move_tracks.is_empty()
    }

    fn changes(&self) -> PlaylistChanges<'_> {
        let Self {
            name,
            description,
            public,
            ..
        } = self;
        PlaylistChanges {
            name: name.as_deref(),
            description: description
                .as_deref()
                .map(|description| (!description.is_empty()).then_some(description)),
            public: *public,
        }
    }

    #[must_use]
    pub fn patch_operations(&self) -> Vec<PatchOperation> {
        let Self {
            remove_all_tracks,
            remove_tracks,
            add_tracks,
            move_tracks,
            ..
        } = self;
        let mut operations = Vec::with_capacity(3 + move_tracks.len());
        if *remove_all_tracks {
            operations.push(PatchOperation::RemoveAll);
        }
        if !remove_tracks.is_empty() {
            operations.push(PatchOperation::Remove {
                positions: remove_tracks.clone(),
            });
        }
        if !add_tracks.is_empty() {
            operations.push(PatchOperation::Append {
                track_ids: add_tracks.clone(),
            });
        }
        operations.extend(
            move_tracks
                .iter()
                .filter(|(from, to)| from != to)
                .map(|&(from, to)| PatchOperation::Move { from, to }),
        );
        operations
    }
}

#[derive(Debug)]
pub struct ValidatedUpdateParams(UpdateParams);

impl ValidatedUpdateParams {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let Self(params) = self;
        params.is_empty()
    }
}

pub fn validate_update_params(params: UpdateParams) -> InputResult<ValidatedUpdateParams> {
    if params
        .name
        .as_deref()
        .is_some_and(|name| name.trim().is_empty())
    {
        return Err(anyhow::anyhow!("Invalid playlist input: empty name").into());
    }
    Ok(ValidatedUpdateParams(params))
}

/// Modify the properties and entries of a playlist
///
/// Fails with [`RepoError::NotFound`] if the playlist doesn't exist.
/// The caller is responsible for rolling back all modifications on
/// failure by running this function inside a transaction.
pub fn update<Repo>(
    repo: &mut Repo,
    id: RecordId,
    params: &ValidatedUpdateParams,
    abort_flag: &AtomicBool,
) -> RepoResult<()>
where
    Repo: PlaylistRepo,
{
    let ValidatedUpdateParams(params) = params;
    if params.is_empty() {
        return Ok(());
    }
    let updated_at = UtcDateTimeSecs::now();
    // Also verifies that the playlist exists
    repo.update_playlist(id, updated_at, params.changes())?;
    entries::patch(repo, id, params.patch_operations(), abort_flag)?;
    log::debug!("Updated playlist {id}");
    Ok(())
}
