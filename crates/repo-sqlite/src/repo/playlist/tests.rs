// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use test_log::test;

use setlist_core::Track;
use setlist_repo::track::EntityRepo as _;

use crate::prelude::tests::*;

use super::*;

struct Fixture {
    db: DbConnection,
}

impl Fixture {
    fn new() -> TestResult<Self> {
        let db = establish_connection()?;
        Ok(Self { db })
    }

    fn connection(&mut self) -> crate::prelude::Connection<'_> {
        crate::prelude::Connection::new(&mut self.db)
    }

    /// Tracks with durations of 1, 2, 3, ... seconds
    fn create_tracks(&mut self, count: usize) -> RepoResult<Vec<TrackId>> {
        let mut db = self.connection();
        let created_at = UtcDateTimeSecs::now();
        (0..count)
            .map(|i| {
                let track = Track {
                    title: format!("Track {i}"),
                    artist: None,
                    album: None,
                    duration: Some(Duration::from_secs(i as u64 + 1)),
                };
                db.insert_track(created_at, &track)
            })
            .collect()
    }

    fn create_playlist(&mut self, name: &str, track_ids: &[TrackId]) -> RepoResult<RecordId> {
        let mut db = self.connection();
        let id = db.insert_playlist(UtcDateTimeSecs::now(), &Playlist::new(name))?;
        db.append_playlist_entries(id, track_ids)?;
        Ok(id)
    }

    fn track_ids(&mut self, playlist_id: RecordId) -> RepoResult<Vec<TrackId>> {
        let entries = self.connection().load_playlist_entries(playlist_id)?;
        for (index, entry) in entries.iter().enumerate() {
            assert_eq!(index, entry.position);
        }
        Ok(entries.into_iter().map(|entry| entry.track_id).collect())
    }
}

#[test]
fn insert_and_load_playlist() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = fixture.connection();

    let created_at = UtcDateTimeSecs::from_unix_timestamp_secs(850_960_857);
    let playlist = Playlist {
        name: "Name".to_owned(),
        description: Some("Description".to_owned()),
        public: false,
    };
    let id = db.insert_playlist(created_at, &playlist)?;

    let (header, loaded) = db.load_playlist(id)?;
    assert_eq!(id, header.id);
    assert_eq!(created_at, header.created_at);
    assert_eq!(created_at, header.updated_at);
    assert_eq!(playlist, loaded);

    Ok(())
}

#[test]
fn update_playlist_selectively() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = fixture.connection();

    let created_at = UtcDateTimeSecs::from_unix_timestamp_secs(850_960_857);
    let id = db.insert_playlist(
        created_at,
        &Playlist {
            name: "Name".to_owned(),
            description: Some("Description".to_owned()),
            public: true,
        },
    )?;

    let updated_at = UtcDateTimeSecs::from_unix_timestamp_secs(850_960_858);
    db.update_playlist(
        id,
        updated_at,
        PlaylistChanges {
            public: Some(false),
            ..Default::default()
        },
    )?;
    let (header, playlist) = db.load_playlist(id)?;
    assert_eq!(created_at, header.created_at);
    assert_eq!(updated_at, header.updated_at);
    assert_eq!("Name", playlist.name);
    assert_eq!(Some("Description"), playlist.description.as_deref());
    assert!(!playlist.public);

    db.update_playlist(
        id,
        updated_at,
        PlaylistChanges {
            name: Some("Renamed"),
            description: Some(None),
            ..Default::default()
        },
    )?;
    let (_, playlist) = db.load_playlist(id)?;
    assert_eq!("Renamed", playlist.name);
    assert!(playlist.description.is_none());
    assert!(!playlist.public);

    Ok(())
}

#[test]
fn update_and_purge_missing_playlist() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = fixture.connection();

    let id = RecordId::new(1);
    assert!(matches!(
        db.update_playlist(id, UtcDateTimeSecs::now(), PlaylistChanges::default()),
        Err(RepoError::NotFound)
    ));
    assert!(matches!(db.load_playlist(id), Err(RepoError::NotFound)));
    assert!(matches!(db.purge_playlist(id), Err(RepoError::NotFound)));

    Ok(())
}

#[test]
fn append_entries_keeps_caller_order_and_duplicates() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let tracks = fixture.create_tracks(3)?;
    let id = fixture.create_playlist("Playlist", &[tracks[2], tracks[0]])?;

    fixture
        .connection()
        .append_playlist_entries(id, &[tracks[1], tracks[2]])?;

    assert_eq!(
        vec![tracks[2], tracks[0], tracks[1], tracks[2]],
        fixture.track_ids(id)?
    );

    Ok(())
}

#[test]
fn entries_summary() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let tracks = fixture.create_tracks(3)?;
    let empty_id = fixture.create_playlist("Empty", &[])?;
    let id = fixture.create_playlist("Playlist", &[tracks[0], tracks[2], tracks[2]])?;

    let mut db = fixture.connection();
    assert_eq!(
        EntriesSummary::default(),
        db.load_playlist_entries_summary(empty_id)?
    );
    assert_eq!(
        EntriesSummary {
            tracks_count: 3,
            duration: Duration::from_secs(1 + 3 + 3),
        },
        db.load_playlist_entries_summary(id)?
    );

    Ok(())
}

#[test]
fn remove_entries_shifts_tail() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let tracks = fixture.create_tracks(5)?;
    let id = fixture.create_playlist("Playlist", &tracks)?;

    // Duplicate and out of range positions are ignored
    let removed_count = fixture
        .connection()
        .remove_playlist_entries(id, &[1, 3, 1, 7])?;
    assert_eq!(2, removed_count);
    assert_eq!(vec![tracks[0], tracks[2], tracks[4]], fixture.track_ids(id)?);

    assert_eq!(0, fixture.connection().remove_playlist_entry(id, 3)?);
    assert_eq!(1, fixture.connection().remove_playlist_entry(id, 0)?);
    assert_eq!(vec![tracks[2], tracks[4]], fixture.track_ids(id)?);

    Ok(())
}

#[test]
fn insert_entry_shifts_tail_and_clamps_position() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let tracks = fixture.create_tracks(4)?;
    let id = fixture.create_playlist("Playlist", &tracks[..2])?;

    fixture.connection().insert_playlist_entry(id, 0, tracks[2])?;
    assert_eq!(vec![tracks[2], tracks[0], tracks[1]], fixture.track_ids(id)?);

    fixture.connection().insert_playlist_entry(id, 10, tracks[3])?;
    assert_eq!(
        vec![tracks[2], tracks[0], tracks[1], tracks[3]],
        fixture.track_ids(id)?
    );

    Ok(())
}

#[test]
fn move_entries() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let tracks = fixture.create_tracks(4)?;
    let [a, b, c, d] = [tracks[0], tracks[1], tracks[2], tracks[3]];
    let id = fixture.create_playlist("Playlist", &tracks)?;

    fixture.connection().move_playlist_entry(id, 0, 2)?;
    assert_eq!(vec![b, c, a, d], fixture.track_ids(id)?);

    fixture.connection().move_playlist_entry(id, 3, 0)?;
    assert_eq!(vec![d, b, c, a], fixture.track_ids(id)?);

    fixture.connection().move_playlist_entry(id, 1, 1)?;
    assert_eq!(vec![d, b, c, a], fixture.track_ids(id)?);

    Ok(())
}

#[test]
fn move_entry_from_missing_position_fails() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let tracks = fixture.create_tracks(2)?;
    let id = fixture.create_playlist("Playlist", &tracks)?;

    let err = fixture
        .connection()
        .move_playlist_entry(id, 5, 0)
        .unwrap_err();
    assert!(matches!(err, RepoError::Other(_)));
    assert_eq!(format!("no entry at position 5 in playlist {id}"), err.to_string());
    assert_eq!(tracks, fixture.track_ids(id)?);

    Ok(())
}

#[test]
fn purge_playlist_cascades_entries() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let tracks = fixture.create_tracks(2)?;
    let id = fixture.create_playlist("Playlist", &tracks)?;
    let other_id = fixture.create_playlist("Other", &tracks)?;

    let mut db = fixture.connection();
    db.purge_playlist(id)?;
    assert_eq!(0, db.count_playlist_entries(id)?);
    assert_eq!(2, db.count_playlist_entries(other_id)?);
    assert_eq!(1, db.count_playlists()?);

    Ok(())
}

#[test]
fn entries_reference_existing_tracks() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let id = fixture.create_playlist("Playlist", &[])?;

    let err = fixture
        .connection()
        .append_playlist_entries(id, &[TrackId::new(42)])
        .unwrap_err();
    let err = match err {
        RepoError::Other(err) => err,
        err => panic!("unexpected error: {err}"),
    };
    assert_eq!(
        format!("failed to append 1 track(s) to playlist {id}"),
        err.to_string()
    );
    assert!(
        err.chain()
            .any(|cause| cause.to_string()
                == format!("failed to insert track 42 at position 0 in playlist {id}"))
    );
    assert_eq!(0, fixture.connection().count_playlist_entries(id)?);

    Ok(())
}

#[test]
fn remove_all_entries_twice() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let tracks = fixture.create_tracks(3)?;
    let id = fixture.create_playlist("Playlist", &tracks)?;
    let other_id = fixture.create_playlist("Other", &tracks)?;

    let mut db = fixture.connection();
    assert_eq!(3, db.remove_all_playlist_entries(id)?);
    assert_eq!(0, db.count_playlist_entries(id)?);
    assert_eq!(0, db.remove_all_playlist_entries(id)?);
    assert_eq!(0, db.count_playlist_entries(id)?);
    assert_eq!(3, db.count_playlist_entries(other_id)?);

    // Appending starts at position 0 again
    db.append_playlist_entries(id, &tracks[1..2])?;
    assert_eq!(vec![tracks[1]], fixture.track_ids(id)?);

    Ok(())
}

#[test]
fn listed_summaries_match_single_summaries() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let tracks = fixture.create_tracks(3)?;
    let ids = vec![
        fixture.create_playlist("1", &tracks)?,
        fixture.create_playlist("2", &[])?,
        fixture.create_playlist("3", &[tracks[2], tracks[2]])?,
        fixture.create_playlist("4", &[])?,
    ];

    let mut db = fixture.connection();
    let mut all: Vec<(RecordHeader, PlaylistWithEntriesSummary)> = Vec::new();
    db.load_playlists_with_entries_summary(None, &mut all)?;
    assert_eq!(ids.len(), all.len());
    for (header, playlist) in &all {
        assert_eq!(
            db.load_playlist_entries_summary(header.id)?,
            playlist.entries
        );
    }
    assert_eq!(
        vec![3, 0, 2, 0],
        all.iter()
            .map(|(_, playlist)| playlist.entries.tracks_count)
            .collect::<Vec<_>>()
    );
    assert_eq!(Duration::from_secs(6), all[0].1.entries.duration);
    assert_eq!(Duration::ZERO, all[1].1.entries.duration);
    assert_eq!(Duration::from_secs(6), all[2].1.entries.duration);

    Ok(())
}

#[test]
fn load_playlists_paginated() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let tracks = fixture.create_tracks(2)?;
    let ids = vec![
        fixture.create_playlist("1", &[])?,
        fixture.create_playlist("2", &tracks)?,
        fixture.create_playlist("3", &tracks[..1])?,
    ];

    let mut db = fixture.connection();
    assert_eq!(3, db.count_playlists()?);

    let mut all: Vec<(RecordHeader, PlaylistWithEntriesSummary)> = Vec::new();
    db.load_playlists_with_entries_summary(None, &mut all)?;
    assert_eq!(
        ids,
        all.iter().map(|(header, _)| header.id).collect::<Vec<_>>()
    );
    assert_eq!(2, all[1].1.entries.tracks_count);
    assert_eq!(Duration::from_secs(3), all[1].1.entries.duration);

    let mut page: Vec<(RecordHeader, PlaylistWithEntriesSummary)> = Vec::new();
    db.load_playlists_with_entries_summary(
        Some(&Pagination::from_offset_count(1, 1)),
        &mut page,
    )?;
    assert_eq!(1, page.len());
    assert_eq!(ids[1], page[0].0.id);
    assert_eq!("2", page[0].1.playlist.name);

    let mut tail: Vec<(RecordHeader, PlaylistWithEntriesSummary)> = Vec::new();
    db.load_playlists_with_entries_summary(
        Some(&Pagination::from_offset_count(2, 10)),
        &mut tail,
    )?;
    assert_eq!(vec![ids[2]], tail.iter().map(|(header, _)| header.id).collect::<Vec<_>>());

    let mut empty: Vec<(RecordHeader, PlaylistWithEntriesSummary)> = Vec::new();
    db.load_playlists_with_entries_summary(
        Some(&Pagination::from_offset_count(1, 0)),
        &mut empty,
    )?;
    assert!(empty.is_empty());

    Ok(())
}
