//! One handler per control endpoint, mapping player results onto the
//! surface's status codes and short texts.

use crate::error::Error;
use crate::library::list_dir;
use crate::player::SharedPlayer;

use super::docs;
use super::types::{Method, Request, Response, Route};

/// The full route table for this unit, in registration order.
pub fn routes(player: &SharedPlayer) -> Vec<Route> {
    vec![
        route(Method::Put, "/playlist/add", true, player, playlist_add),
        route(Method::Put, "/playlist/play", true, player, playlist_play),
        route(Method::Put, "/playlist/remove", true, player, playlist_remove),
        route(Method::Put, "/playlist/flush", false, player, playlist_flush),
        route(Method::Get, "/playlist", false, player, playlist),
        route(Method::Put, "/play", true, player, play),
        route(Method::Put, "/pause", false, player, pause),
        route(Method::Put, "/stop", false, player, stop),
        route(Method::Put, "/prev", false, player, prev),
        route(Method::Put, "/next", false, player, next),
        route(Method::Put, "/seek", true, player, seek),
        route(Method::Get, "/status", true, player, status),
        route(Method::Get, "/list", true, player, list),
    ]
}

fn route(
    method: Method,
    path: &'static str,
    trailing: bool,
    player: &SharedPlayer,
    f: fn(&SharedPlayer, &Request) -> Response,
) -> Route {
    let player = player.clone();
    Route::new(method, path, trailing, Box::new(move |req| f(&player, req)))
}

fn playlist_add(player: &SharedPlayer, req: &Request) -> Response {
    let Ok(mut player) = player.lock() else {
        return Response::text(500, "Playlist error");
    };
    match player.add(&req.resource) {
        Ok(_) => Response::ok(),
        Err(_) => Response::text(406, "File is not supported"),
    }
}

fn playlist_play(player: &SharedPlayer, req: &Request) -> Response {
    let Ok(index) = req.resource.parse::<usize>() else {
        return Response::text(400, "Bad index");
    };
    let Ok(mut player) = player.lock() else {
        return Response::text(500, "Playlist error");
    };
    match player.play(Some(index)) {
        Ok(()) => Response::ok(),
        Err(_) => Response::text(500, "Playlist error"),
    }
}

fn playlist_remove(player: &SharedPlayer, req: &Request) -> Response {
    let Ok(index) = req.resource.parse::<usize>() else {
        return Response::text(400, "Bad index");
    };
    let Ok(mut player) = player.lock() else {
        return Response::text(500, "Playlist error");
    };
    match player.remove(index) {
        Ok(()) => Response::ok(),
        Err(Error::IndexOutOfRange(_)) => Response::text(400, "Bad index"),
        Err(_) => Response::text(500, "Playlist error"),
    }
}

fn playlist_flush(player: &SharedPlayer, _req: &Request) -> Response {
    let Ok(mut player) = player.lock() else {
        return Response::text(500, "Playlist error");
    };
    player.flush();
    Response::ok()
}

fn playlist(player: &SharedPlayer, _req: &Request) -> Response {
    let entries = {
        let Ok(player) = player.lock() else {
            return Response::text(500, "Playlist error");
        };
        player.entries()
    };
    Response::json(&docs::playlist_doc(&entries))
}

fn play(player: &SharedPlayer, req: &Request) -> Response {
    let Ok(mut player) = player.lock() else {
        return Response::text(500, "Playlist error");
    };

    let index = if req.resource.is_empty() {
        None
    } else {
        match player.add(&req.resource) {
            Ok(index) => Some(index),
            Err(_) => return Response::text(406, "File is not supported"),
        }
    };

    match player.play(index) {
        Ok(()) => Response::ok(),
        Err(_) => Response::text(406, "Cannot play the file"),
    }
}

fn pause(player: &SharedPlayer, _req: &Request) -> Response {
    let Ok(mut player) = player.lock() else {
        return Response::text(500, "Playlist error");
    };
    player.pause();
    Response::ok()
}

fn stop(player: &SharedPlayer, _req: &Request) -> Response {
    let Ok(mut player) = player.lock() else {
        return Response::text(500, "Playlist error");
    };
    player.stop();
    Response::ok()
}

fn prev(player: &SharedPlayer, _req: &Request) -> Response {
    let Ok(mut player) = player.lock() else {
        return Response::text(500, "Playlist error");
    };
    player.prev();
    Response::ok()
}

fn next(player: &SharedPlayer, _req: &Request) -> Response {
    let Ok(mut player) = player.lock() else {
        return Response::text(500, "Playlist error");
    };
    player.next();
    Response::ok()
}

fn seek(player: &SharedPlayer, req: &Request) -> Response {
    let Ok(pos) = req.resource.parse::<u64>() else {
        return Response::text(400, "Bad position");
    };
    let Ok(mut player) = player.lock() else {
        return Response::text(500, "Playlist error");
    };
    match player.seek(pos) {
        Ok(()) => Response::ok(),
        Err(_) => Response::text(400, "Bad position"),
    }
}

fn status(player: &SharedPlayer, req: &Request) -> Response {
    let with_picture = req.resource.starts_with("img");
    let snapshot = {
        let Ok(player) = player.lock() else {
            return Response::text(500, "Status error");
        };
        player.status()
    };
    Response::json(&docs::status_doc(snapshot.as_ref(), with_picture))
}

fn list(player: &SharedPlayer, req: &Request) -> Response {
    // Browsing only needs the configured root; the directory walk and the
    // per-file tag parsing happen with the lock released.
    let root = {
        let Ok(player) = player.lock() else {
            return Response::text(500, "Status error");
        };
        player.root().to_path_buf()
    };
    match list_dir(&root, &req.resource) {
        Ok(listing) => Response::json(&docs::listing_doc(&listing)),
        Err(_) => Response::text(404, "Bad directory"),
    }
}
