// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[test]
fn verify_app() {
    new_app().debug_assert();
}

#[test]
fn parse_move_pairs() {
    assert_eq!(Ok((0, 2)), parse_move("0:2"));
    assert_eq!(Ok((3, 1)), parse_move(" 3 : 1 "));
    assert!(parse_move("3").is_err());
    assert!(parse_move("-1:2").is_err());
    assert!(parse_move("a:b").is_err());
}

#[test]
fn format_durations() {
    assert_eq!("0:00", format_duration(Duration::ZERO));
    assert_eq!("3:07", format_duration(Duration::from_millis(187_999)));
    assert_eq!("61:01", format_duration(Duration::from_secs(3661)));
}

#[test]
fn update_params_from_args() {
    let matches = new_app().get_matches_from([
        "setlist",
        "update",
        "7",
        "--name",
        "Renamed",
        "--private",
        "--remove",
        "3",
        "--remove",
        "1",
        "--add",
        "42",
        "--move",
        "0:2",
        "--move",
        "2:0",
    ]);
    let Some(("update", matches)) = matches.subcommand() else {
        panic!("update subcommand expected");
    };
    assert_eq!(PlaylistId::new(7), playlist_id(matches));
    assert_eq!(
        UpdateParams {
            name: Some("Renamed".to_owned()),
            description: None,
            public: Some(false),
            remove_all_tracks: false,
            remove_tracks: vec![3, 1],
            add_tracks: vec![TrackId::new(42)],
            move_tracks: vec![(0, 2), (2, 0)],
        },
        update_params(matches)
    );
}

#[test]
fn update_without_args_is_empty() {
    let matches = new_app().get_matches_from(["setlist", "update", "1"]);
    let Some(("update", matches)) = matches.subcommand() else {
        panic!("update subcommand expected");
    };
    assert!(update_params(matches).is_empty());
}

#[test]
fn public_conflicts_with_private() {
    assert!(
        new_app()
            .try_get_matches_from(["setlist", "update", "1", "--public", "--private"])
            .is_err()
    );
}
