use std::env;

pub fn insta_snapshot<F: FnOnce()>(f: F) {
    let mut settings = insta::Settings::clone_current();
    let snapshot_path = env::current_dir().unwrap().join("./test/snapshots");
    settings.set_snapshot_path(snapshot_path);
    settings.bind(f);
}

/// A `getLists` payload as the backend returns it, newest first.
pub fn saved_lists_fixture() -> &'static str {
    return r#"
[
  {
    "_id": "6650f1c2a1b2c3d4e5f60002",
    "name": "Redirects",
    "codes": [301, 302],
    "imageUrls": ["https://http.dog/301.jpg", "https://http.dog/302.jpg"],
    "createdAt": "Tue, 14 May 2024 09:30:00 GMT",
    "user_id": "6650f0aaa1b2c3d4e5f60000"
  },
  {
    "_id": "6650f1c2a1b2c3d4e5f60001",
    "name": "Teapots",
    "codes": [418],
    "imageUrls": ["https://http.dog/418.jpg"],
    "createdAt": "Mon, 13 May 2024 18:00:00 GMT",
    "user_id": "6650f0aaa1b2c3d4e5f60000"
  }
]
"#
    .trim();
}
