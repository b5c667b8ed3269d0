// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

use setlist::{
    Playlist, Track,
    backend_embedded::{self, playlist, prelude::Gatekeeper, storage, track},
    playlist::Position,
    repo::{playlist::RecordId as PlaylistId, track::RecordId as TrackId},
    storage_sqlite::connection::Storage,
    usecases::playlist::UpdateParams,
};

mod config;
mod env;

use self::config::Config;

const CONFIG_ARG: &str = "config";
const DATABASE_ARG: &str = "database";

const ID_ARG: &str = "id";
const NAME_ARG: &str = "name";
const TRACK_IDS_ARG: &str = "track-ids";

const TITLE_ARG: &str = "title";
const ARTIST_ARG: &str = "artist";
const ALBUM_ARG: &str = "album";
const DURATION_MS_ARG: &str = "duration-ms";

const OFFSET_ARG: &str = "offset";
const COUNT_ARG: &str = "count";

const DESCRIPTION_ARG: &str = "description";
const PUBLIC_ARG: &str = "public";
const PRIVATE_ARG: &str = "private";
const REMOVE_ALL_ARG: &str = "remove-all";
const REMOVE_ARG: &str = "remove";
const ADD_ARG: &str = "add";
const MOVE_ARG: &str = "move";

/// Parse a `<from>:<to>` pair of positions
fn parse_move(arg: &str) -> Result<(Position, Position), String> {
    let (from, to) = arg
        .split_once(':')
        .ok_or_else(|| format!("expected <from>:<to> instead of '{arg}'"))?;
    let from = from
        .trim()
        .parse()
        .map_err(|err| format!("invalid position '{from}': {err}"))?;
    let to = to
        .trim()
        .parse()
        .map_err(|err| format!("invalid position '{to}': {err}"))?;
    Ok((from, to))
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[allow(clippy::too_many_lines)]
fn new_app() -> Command {
    let id_arg = Arg::new(ID_ARG)
        .help("The id of the playlist")
        .value_parser(value_parser!(i64))
        .required(true);
    Command::new("setlist")
        .about("Manage ordered playlists in an embedded SQLite database")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg(
            Arg::new(CONFIG_ARG)
                .long(CONFIG_ARG)
                .help("Configuration file (RON)")
                .value_parser(value_parser!(PathBuf))
                .num_args(1)
                .global(true),
        )
        .arg(
            Arg::new(DATABASE_ARG)
                .long(DATABASE_ARG)
                .help("Database file, overrides the configured storage")
                .value_parser(value_parser!(PathBuf))
                .num_args(1)
                .global(true),
        )
        .subcommand(
            Command::new("add-track")
                .about("Adds a track to the catalog")
                .arg(
                    Arg::new(TITLE_ARG)
                        .long(TITLE_ARG)
                        .num_args(1)
                        .required(true),
                )
                .arg(Arg::new(ARTIST_ARG).long(ARTIST_ARG).num_args(1))
                .arg(Arg::new(ALBUM_ARG).long(ALBUM_ARG).num_args(1))
                .arg(
                    Arg::new(DURATION_MS_ARG)
                        .long(DURATION_MS_ARG)
                        .value_parser(value_parser!(u64))
                        .num_args(1),
                ),
        )
        .subcommand(
            Command::new("create")
                .about("Creates a new playlist with the given tracks")
                .arg(Arg::new(NAME_ARG).required(true))
                .arg(
                    Arg::new(TRACK_IDS_ARG)
                        .help("Ids of the tracks in playlist order")
                        .value_parser(value_parser!(i64))
                        .num_args(0..),
                ),
        )
        .subcommand(
            Command::new("get")
                .about("Shows a playlist with all its tracks")
                .arg(id_arg.clone()),
        )
        .subcommand(
            Command::new("list")
                .about("Lists playlists ordered by id")
                .arg(
                    Arg::new(OFFSET_ARG)
                        .long(OFFSET_ARG)
                        .value_parser(value_parser!(u64))
                        .default_value("0"),
                )
                .arg(
                    Arg::new(COUNT_ARG)
                        .long(COUNT_ARG)
                        .help("Maximum number of playlists, 0 for all if the offset is 0")
                        .value_parser(value_parser!(u64))
                        .default_value("0"),
                ),
        )
        .subcommand(Command::new("count").about("Counts all playlists"))
        .subcommand(
            Command::new("update")
                .about("Modifies a playlist atomically")
                .after_help(
                    "Track modifications are applied in the following order: --remove-all, \
                     --remove, --add, --move",
                )
                .arg(id_arg.clone())
                .arg(Arg::new(NAME_ARG).long(NAME_ARG).num_args(1))
                .arg(
                    Arg::new(DESCRIPTION_ARG)
                        .long(DESCRIPTION_ARG)
                        .help("An empty description clears the current one")
                        .num_args(1),
                )
                .arg(
                    Arg::new(PUBLIC_ARG)
                        .long(PUBLIC_ARG)
                        .action(ArgAction::SetTrue)
                        .conflicts_with(PRIVATE_ARG),
                )
                .arg(
                    Arg::new(PRIVATE_ARG)
                        .long(PRIVATE_ARG)
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new(REMOVE_ALL_ARG)
                        .long(REMOVE_ALL_ARG)
                        .help("Removes all tracks")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new(REMOVE_ARG)
                        .long(REMOVE_ARG)
                        .help("Removes the track at the given position")
                        .value_parser(value_parser!(usize))
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new(ADD_ARG)
                        .long(ADD_ARG)
                        .help("Appends the track with the given id")
                        .value_parser(value_parser!(i64))
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new(MOVE_ARG)
                        .long(MOVE_ARG)
                        .help("Moves a track, e.g. 0:2")
                        .value_parser(parse_move)
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Deletes a playlist")
                .arg(id_arg),
        )
        .subcommand(Command::new("vacuum").about("Rebuilds and analyzes the database"))
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<Config> {
    let mut config = if let Some(file_path) = matches.get_one::<PathBuf>(CONFIG_ARG) {
        Config::load_from_file(file_path)?
    } else {
        Config::default()
    };
    if let Some(path) = matches.get_one::<PathBuf>(DATABASE_ARG) {
        config.database.connection.storage = Storage::File { path: path.clone() };
    }
    Ok(config)
}

fn playlist_id(matches: &ArgMatches) -> PlaylistId {
    let id = matches.get_one::<i64>(ID_ARG).copied().unwrap_or_default();
    PlaylistId::new(id)
}

fn update_params(matches: &ArgMatches) -> UpdateParams {
    let public = if matches.get_flag(PUBLIC_ARG) {
        Some(true)
    } else if matches.get_flag(PRIVATE_ARG) {
        Some(false)
    } else {
        None
    };
    UpdateParams {
        name: matches.get_one::<String>(NAME_ARG).cloned(),
        description: matches.get_one::<String>(DESCRIPTION_ARG).cloned(),
        public,
        remove_all_tracks: matches.get_flag(REMOVE_ALL_ARG),
        remove_tracks: matches
            .get_many::<usize>(REMOVE_ARG)
            .unwrap_or_default()
            .copied()
            .collect(),
        add_tracks: matches
            .get_many::<i64>(ADD_ARG)
            .unwrap_or_default()
            .copied()
            .map(TrackId::new)
            .collect(),
        move_tracks: matches
            .get_many::<(Position, Position)>(MOVE_ARG)
            .unwrap_or_default()
            .copied()
            .collect(),
    }
}

fn print_playlist(id: PlaylistId, playlist: &Playlist, tracks_count: usize, duration: Duration) {
    let Playlist {
        name,
        description,
        public,
    } = playlist;
    let visibility = if *public { "public" } else { "private" };
    println!(
        "{id}\t{name}\t{visibility}\t{tracks_count} track(s)\t{duration}",
        duration = format_duration(duration)
    );
    if let Some(description) = description {
        println!("\t{description}");
    }
}

async fn run(db_gatekeeper: &Gatekeeper, matches: &ArgMatches) -> backend_embedded::Result<()> {
    match matches.subcommand() {
        Some(("add-track", matches)) => {
            let new_track = Track {
                title: matches
                    .get_one::<String>(TITLE_ARG)
                    .cloned()
                    .unwrap_or_default(),
                artist: matches.get_one::<String>(ARTIST_ARG).cloned(),
                album: matches.get_one::<String>(ALBUM_ARG).cloned(),
                duration: matches
                    .get_one::<u64>(DURATION_MS_ARG)
                    .copied()
                    .map(Duration::from_millis),
            };
            let id = track::create(db_gatekeeper, new_track).await?;
            println!("{id}");
        }
        Some(("create", matches)) => {
            let name = matches
                .get_one::<String>(NAME_ARG)
                .cloned()
                .unwrap_or_default();
            let track_ids = matches
                .get_many::<i64>(TRACK_IDS_ARG)
                .unwrap_or_default()
                .copied()
                .map(TrackId::new)
                .collect();
            let id = playlist::create(db_gatekeeper, Playlist::new(name), track_ids).await?;
            println!("{id}");
        }
        Some(("get", matches)) => {
            let (header, playlist_with_tracks) =
                playlist::get(db_gatekeeper, playlist_id(matches)).await?;
            let entries = &playlist_with_tracks.playlist.entries;
            print_playlist(
                header.id,
                &playlist_with_tracks.playlist.playlist,
                entries.tracks_count,
                entries.duration,
            );
            for (position, (track_header, track)) in
                playlist_with_tracks.tracks.iter().enumerate()
            {
                let Track {
                    title,
                    artist,
                    album,
                    duration,
                } = track;
                println!(
                    "{position}\t{track_id}\t{title}\t{artist}\t{album}\t{duration}",
                    track_id = track_header.id,
                    artist = artist.as_deref().unwrap_or_default(),
                    album = album.as_deref().unwrap_or_default(),
                    duration = duration.map(format_duration).unwrap_or_default(),
                );
            }
        }
        Some(("list", matches)) => {
            let offset = matches.get_one::<u64>(OFFSET_ARG).copied().unwrap_or(0);
            let count = matches.get_one::<u64>(COUNT_ARG).copied().unwrap_or(0);
            for (header, playlist_with_entries_summary) in
                playlist::list(db_gatekeeper, offset, count).await?
            {
                let entries = &playlist_with_entries_summary.entries;
                print_playlist(
                    header.id,
                    &playlist_with_entries_summary.playlist,
                    entries.tracks_count,
                    entries.duration,
                );
            }
        }
        Some(("count", _)) => {
            println!("{}", playlist::count(db_gatekeeper).await?);
        }
        Some(("update", matches)) => {
            playlist::update(db_gatekeeper, playlist_id(matches), update_params(matches)).await?;
        }
        Some(("delete", matches)) => {
            playlist::delete(db_gatekeeper, playlist_id(matches)).await?;
        }
        Some(("vacuum", _)) => {
            storage::cleanse_database(db_gatekeeper, true).await?;
        }
        Some((subcommand, _)) => {
            unreachable!("Unknown subcommand {subcommand}");
        }
        None => {
            unreachable!("Missing subcommand");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = env::init_tracing_and_logging() {
        eprintln!("Failed to initialize tracing and logging: {err}");
        return ExitCode::FAILURE;
    }

    let matches = new_app().get_matches();

    let config = match load_config(&matches) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Failed to load configuration: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    log::debug!("{config:?}");

    let db_gatekeeper = match storage::commission_database(&config.database) {
        Ok(db_gatekeeper) => db_gatekeeper,
        Err(err) => {
            log::error!("Failed to commission database: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let result = run(&db_gatekeeper, &matches).await;
    db_gatekeeper.decommission();
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_not_found() => {
            log::error!("Not found");
            ExitCode::FAILURE
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests;
