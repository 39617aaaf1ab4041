//! In-memory repository fakes shared by the unit tests of this crate.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use postboard_domain::error::PostboardError;
use postboard_domain::id::{PostId, UserId};
use postboard_domain::post::Post;
use postboard_domain::user::User;

use crate::ports::{PostRepository, UserRepository};

#[derive(Default)]
pub struct InMemoryUserRepo {
    pub store: Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn with(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            store: Mutex::new(users.into_iter().collect()),
        }
    }

    pub fn snapshot(&self) -> Vec<User> {
        self.store.lock().unwrap().clone()
    }
}

impl UserRepository for InMemoryUserRepo {
    fn create(&self, user: User) -> impl Future<Output = Result<User, PostboardError>> + Send {
        self.store.lock().unwrap().push(user.clone());
        async { Ok(user) }
    }

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, PostboardError>> + Send {
        let store = self.store.lock().unwrap();
        let result = store.iter().find(|user| user.id == id).cloned();
        async { Ok(result) }
    }

    fn find_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<(Vec<User>, u64), PostboardError>> + Send {
        let store = self.store.lock().unwrap();
        let total = store.len() as u64;
        let page: Vec<User> = store
            .iter()
            .skip(usize::try_from(offset).unwrap())
            .take(usize::try_from(limit).unwrap())
            .cloned()
            .collect();
        async move { Ok((page, total)) }
    }

    fn update(&self, user: User) -> impl Future<Output = Result<User, PostboardError>> + Send {
        let mut store = self.store.lock().unwrap();
        if let Some(slot) = store.iter_mut().find(|existing| existing.id == user.id) {
            *slot = user.clone();
        }
        async { Ok(user) }
    }

    fn delete(&self, id: UserId) -> impl Future<Output = Result<(), PostboardError>> + Send {
        self.store.lock().unwrap().retain(|user| user.id != id);
        async { Ok(()) }
    }
}

#[derive(Default)]
pub struct InMemoryPostRepo {
    pub store: Mutex<HashMap<PostId, Post>>,
}

impl InMemoryPostRepo {
    pub fn with(posts: impl IntoIterator<Item = Post>) -> Self {
        Self {
            store: Mutex::new(posts.into_iter().map(|post| (post.id, post)).collect()),
        }
    }

    pub fn snapshot(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.store.lock().unwrap().values().cloned().collect();
        posts.sort_by(|a, b| a.title.cmp(&b.title));
        posts
    }
}

impl PostRepository for InMemoryPostRepo {
    fn create(&self, post: Post) -> impl Future<Output = Result<Post, PostboardError>> + Send {
        self.store.lock().unwrap().insert(post.id, post.clone());
        async { Ok(post) }
    }

    fn get_by_id(
        &self,
        id: PostId,
    ) -> impl Future<Output = Result<Option<Post>, PostboardError>> + Send {
        let result = self.store.lock().unwrap().get(&id).cloned();
        async { Ok(result) }
    }

    fn find_by_user_and_title(
        &self,
        user_id: UserId,
        title: &str,
    ) -> impl Future<Output = Result<Option<Post>, PostboardError>> + Send {
        let result = self
            .store
            .lock()
            .unwrap()
            .values()
            .find(|post| post.user_id == user_id && post.title == title)
            .cloned();
        async { Ok(result) }
    }

    fn find_by_id_and_user(
        &self,
        id: PostId,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Post>, PostboardError>> + Send {
        let result = self
            .store
            .lock()
            .unwrap()
            .get(&id)
            .filter(|post| post.user_id == user_id)
            .cloned();
        async { Ok(result) }
    }

    fn find_page_by_user(
        &self,
        user_id: UserId,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<(Vec<Post>, u64), PostboardError>> + Send {
        let owned: Vec<Post> = self
            .snapshot()
            .into_iter()
            .filter(|post| post.user_id == user_id)
            .collect();
        let total = owned.len() as u64;
        let page: Vec<Post> = owned
            .into_iter()
            .skip(usize::try_from(offset).unwrap())
            .take(usize::try_from(limit).unwrap())
            .collect();
        async move { Ok((page, total)) }
    }

    fn search_by_title(
        &self,
        title: &str,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<Post>, PostboardError>> + Send {
        let page: Vec<Post> = self
            .snapshot()
            .into_iter()
            .filter(|post| post.title.contains(title))
            .skip(usize::try_from(offset).unwrap())
            .take(usize::try_from(limit).unwrap())
            .collect();
        async move { Ok(page) }
    }

    fn update(&self, post: Post) -> impl Future<Output = Result<Post, PostboardError>> + Send {
        self.store.lock().unwrap().insert(post.id, post.clone());
        async { Ok(post) }
    }

    fn delete(&self, id: PostId) -> impl Future<Output = Result<(), PostboardError>> + Send {
        self.store.lock().unwrap().remove(&id);
        async { Ok(()) }
    }

    fn delete_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<u64, PostboardError>> + Send {
        let mut store = self.store.lock().unwrap();
        let before = store.len();
        store.retain(|_, post| post.user_id != user_id);
        let removed = (before - store.len()) as u64;
        async move { Ok(removed) }
    }
}
