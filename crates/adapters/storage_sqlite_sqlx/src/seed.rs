//! Demo data for a fresh database.

use chrono::{TimeZone, Utc};

use postboard_app::ports::{PostRepository, UserRepository};
use postboard_domain::error::PostboardError;
use postboard_domain::id::UserId;
use postboard_domain::post::Post;
use postboard_domain::time::now;
use postboard_domain::user::User;

/// Posts written for every seeded user.
pub const POSTS_PER_USER: usize = 30;

/// `(id, first name, last name, birth year)` of the seeded users.
pub const USERS: [(&str, &str, &str, i32); 7] = [
    ("02a0c3b3-caf6-40a1-9210-963078da87d2", "Alice", "one", 2004),
    ("06b94b0d-e99a-48aa-bb9a-5ea6d8771ed1", "Bob", "two", 1994),
    ("ca784720-794c-4a96-9a2f-57b1c3c53c6e", "Candice", "three", 1984),
    ("d07a5aa7-c612-4d4c-bb5f-11c4f872ef9b", "Derek", "four", 1974),
    ("3438a3dc-cdac-48cb-8ac4-c746bc380f45", "John", "five", 1995),
    ("852f951b-00b5-4fae-835d-598166bf615a", "David", "six", 1967),
    ("e3c67055-9682-4791-b12d-5221214e250a", "Tes", "seven", 1945),
];

/// Insert the demo users and their posts, skipping users that already
/// exist. Returns how many users were inserted.
///
/// Writes go straight to the repositories; no events are published.
///
/// # Errors
///
/// Returns a storage error when an insert fails.
pub async fn seed<UR, PR>(users: &UR, posts: &PR) -> Result<usize, PostboardError>
where
    UR: UserRepository + Sync,
    PR: PostRepository + Sync,
{
    let mut inserted = 0;
    for (id, first_name, last_name, year) in USERS {
        let id: UserId = id.parse()?;
        if users.get_by_id(id).await?.is_some() {
            continue;
        }
        let birthdate = Utc
            .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_default();
        let user = User::builder()
            .id(id)
            .first_name(first_name)
            .last_name(last_name)
            .birthdate(birthdate)
            .build()?;
        users.create(user).await?;

        for idx in 0..POSTS_PER_USER {
            let post = Post::new(
                id,
                format!("title {idx} by {id}"),
                format!("body {idx} by {id}"),
                now(),
            );
            posts.create(post).await?;
        }
        inserted += 1;
    }

    tracing::info!(users = inserted, "database seeded");
    Ok(inserted)
}
