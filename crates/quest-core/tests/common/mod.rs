#![allow(dead_code)]

use std::sync::Arc;

use argon2::{Algorithm, Argon2, Params, Version};

use quest_core::{GameConfig, GameFacade, NewPost, UserDirectory};
use quest_db::Database;
use quest_geo::{build_position, latitude_inside, latitude_outside};
use quest_types::{NewUser, Role};

pub const DISTANCE_TO_SEARCH: f64 = 10.0;
pub const PASSWORD: &str = "secret";

/// Argon2id with the smallest legal cost so hashing stays fast in tests.
pub fn cheap_argon2() -> Argon2<'static> {
    Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(8, 1, 1, None).unwrap(),
    )
}

pub struct Fixture {
    pub db: Arc<Database>,
    pub users: Arc<UserDirectory>,
    pub game: GameFacade,
}

pub fn empty() -> Fixture {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let users = Arc::new(UserDirectory::with_argon2(db.clone(), cheap_argon2()).unwrap());
    let game = GameFacade::new(db.clone(), users.clone(), GameConfig::default()).unwrap();
    Fixture { db, users, game }
}

/// Teams t1..t3 with password "secret". t1 at (55.77, 12.48), t2 just
/// inside 10m north of it, t3 just outside. Post1 at (55.77, 12.49).
pub fn seeded() -> Fixture {
    let fx = empty();
    for (user_name, name) in [("t1", "Team1"), ("t2", "Team2"), ("t3", "Team3")] {
        fx.users
            .add_user(NewUser {
                name: name.into(),
                user_name: user_name.into(),
                password: PASSWORD.into(),
                role: Role::Team,
            })
            .unwrap();
    }

    let positions = [
        build_position(12.48, 55.77, "t1", "Team1"),
        build_position(12.48, latitude_inside(55.77, DISTANCE_TO_SEARCH), "t2", "Team2"),
        build_position(12.48, latitude_outside(55.77, DISTANCE_TO_SEARCH), "t3", "Team3"),
    ];
    for p in &positions {
        fx.db.upsert_position(p).unwrap();
    }

    fx.game
        .add_post(NewPost {
            id: "Post1".into(),
            task_text: "1+1".into(),
            is_url: false,
            solution: "2".into(),
            lon: 12.49,
            lat: 55.77,
        })
        .unwrap();

    fx
}
