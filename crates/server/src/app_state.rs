use std::sync::Arc;

use shared::protocol::RemoteUser;

/// Read-only seed plus the write-failure switch. Writes never change it.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) seed: Arc<Vec<RemoteUser>>,
    pub(crate) fail_writes: bool,
}

impl AppState {
    pub(crate) fn new(fail_writes: bool) -> Self {
        Self {
            seed: Arc::new(seed_users()),
            fail_writes,
        }
    }
}

fn seed_users() -> Vec<RemoteUser> {
    [
        ("Leanne Graham", "Sincere@april.biz"),
        ("Ervin Howell", "Shanna@melissa.tv"),
        ("Clementine Bauch", "Nathan@yesenia.net"),
        ("Patricia Lebsack", "Julianne.OConner@kory.org"),
        ("Chelsey Dietrich", "Lucio_Hettinger@annie.ca"),
        ("Mrs. Dennis Schulist", "Karley_Dach@jasper.info"),
        ("Kurtis Weissnat", "Telly.Hoeger@billy.biz"),
        ("Nicholas Runolfsdottir V", "Sherwood@rosamond.me"),
        ("Glenna Reichert", "Chaim_McDermott@dana.io"),
        ("Clementina DuBuque", "Rey.Padberg@karina.biz"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, email), id)| RemoteUser {
        id: shared::domain::UserId(id),
        name: name.to_string(),
        email: email.to_string(),
        department: None,
    })
    .collect()
}
