//! In-memory storage - used when no database is configured, and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use yatube_core::domain::{Group, Post, PostFilter, User};
use yatube_core::error::RepoError;
use yatube_core::ports::{BaseRepository, GroupRepository, PostRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    groups: HashMap<Uuid, Group>,
    /// Insertion order; listings walk it backwards so equal timestamps stay newest first.
    posts: Vec<Post>,
}

/// All three repositories over one set of tables behind an async RwLock.
///
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryDatabase {
    tables: RwLock<Tables>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(&user.id)
            || tables.users.values().any(|u| u.username == user.username)
        {
            return Err(RepoError::Constraint("Username already taken".to_string()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        let slot = tables.users.get_mut(&user.id).ok_or(RepoError::NotFound)?;
        *slot = user.clone();
        Ok(user)
    }
}

#[async_trait]
impl UserRepository for InMemoryDatabase {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.users.get(id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BaseRepository<Group, Uuid> for InMemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, RepoError> {
        Ok(self.tables.read().await.groups.get(&id).cloned())
    }

    async fn insert(&self, group: Group) -> Result<Group, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.groups.contains_key(&group.id)
            || tables.groups.values().any(|g| g.slug == group.slug)
        {
            return Err(RepoError::Constraint("Group slug already exists".to_string()));
        }
        tables.groups.insert(group.id, group.clone());
        Ok(group)
    }

    async fn update(&self, group: Group) -> Result<Group, RepoError> {
        let mut tables = self.tables.write().await;
        let slot = tables.groups.get_mut(&group.id).ok_or(RepoError::NotFound)?;
        *slot = group.clone();
        Ok(group)
    }
}

#[async_trait]
impl GroupRepository for InMemoryDatabase {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.groups.values().find(|g| g.slug == slug).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Group>, RepoError> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.groups.get(id))
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Group>, RepoError> {
        let tables = self.tables.read().await;
        let mut groups: Vec<Group> = tables.groups.values().cloned().collect();
        groups.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(groups)
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Constraint("Post already exists".to_string()));
        }
        if !tables.users.contains_key(&post.author_id) {
            return Err(RepoError::Constraint("Unknown author".to_string()));
        }
        if let Some(group_id) = post.group_id {
            if !tables.groups.contains_key(&group_id) {
                return Err(RepoError::Constraint("Unknown group".to_string()));
            }
        }
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }
}

#[async_trait]
impl PostRepository for InMemoryDatabase {
    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.iter().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn list(
        &self,
        filter: &PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let mut matching: Vec<&Post> = tables
            .posts
            .iter()
            .rev()
            .filter(|p| filter.matches(p))
            .collect();
        // Stable sort keeps later insertions ahead on equal timestamps.
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yatube_core::domain::PostDraft;

    async fn seed_user(db: &InMemoryDatabase, username: &str) -> User {
        let user = User::new(username.to_string(), "hash".to_string());
        BaseRepository::<User, Uuid>::insert(db, user).await.unwrap()
    }

    async fn seed_group(db: &InMemoryDatabase, slug: &str) -> Group {
        BaseRepository::<Group, Uuid>::insert(
            db,
            Group::new("title".to_string(), slug.to_string(), String::new()),
        )
        .await
        .unwrap()
    }

    async fn seed_post(
        db: &InMemoryDatabase,
        author: &User,
        text: &str,
        group: Option<&Group>,
    ) -> Post {
        let post = Post::new(
            author.id,
            PostDraft {
                text: text.to_string(),
                group_id: group.map(|g| g.id),
            },
        );
        BaseRepository::<Post, Uuid>::insert(db, post).await.unwrap()
    }

    #[tokio::test]
    async fn test_usernames_and_slugs_are_unique() {
        let db = InMemoryDatabase::new();
        seed_user(&db, "TrueName").await;
        seed_group(&db, "test-slug").await;

        let dup_user = BaseRepository::<User, Uuid>::insert(
            &db,
            User::new("TrueName".to_string(), "other".to_string()),
        )
        .await;
        assert!(matches!(dup_user, Err(RepoError::Constraint(_))));

        let dup_group = BaseRepository::<Group, Uuid>::insert(
            &db,
            Group::new("other".to_string(), "test-slug".to_string(), String::new()),
        )
        .await;
        assert!(matches!(dup_group, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_filtered() {
        let db = InMemoryDatabase::new();
        let alice = seed_user(&db, "alice").await;
        let bob = seed_user(&db, "bob").await;
        let group = seed_group(&db, "test-slug").await;

        let first = seed_post(&db, &alice, "first", Some(&group)).await;
        let second = seed_post(&db, &bob, "second", None).await;
        let third = seed_post(&db, &alice, "third", None).await;

        let all = db.list(&PostFilter::All, 0, 10).await.unwrap();
        let ids: Vec<Uuid> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);

        let by_alice = db.list(&PostFilter::Author(alice.id), 0, 10).await.unwrap();
        assert_eq!(by_alice.len(), 2);
        assert_eq!(db.count(&PostFilter::Author(alice.id)).await.unwrap(), 2);

        let in_group = db.list(&PostFilter::Group(group.id), 0, 10).await.unwrap();
        assert_eq!(in_group, vec![first]);

        let window = db.list(&PostFilter::All, 1, 1).await.unwrap();
        assert_eq!(window, vec![second]);
    }

    #[tokio::test]
    async fn test_update_replaces_only_target_post() {
        let db = InMemoryDatabase::new();
        let alice = seed_user(&db, "alice").await;
        let mut target = seed_post(&db, &alice, "before", None).await;
        let other = seed_post(&db, &alice, "untouched", None).await;

        target.revise(PostDraft {
            text: "after".to_string(),
            group_id: None,
        });
        BaseRepository::<Post, Uuid>::update(&db, target.clone())
            .await
            .unwrap();

        let stored: Option<Post> = BaseRepository::<Post, Uuid>::find_by_id(&db, target.id)
            .await
            .unwrap();
        assert_eq!(stored.unwrap().text, "after");
        let untouched: Option<Post> = BaseRepository::<Post, Uuid>::find_by_id(&db, other.id)
            .await
            .unwrap();
        assert_eq!(untouched.unwrap().text, "untouched");
    }

    #[tokio::test]
    async fn test_update_missing_post_fails() {
        let db = InMemoryDatabase::new();
        let alice = seed_user(&db, "alice").await;
        let ghost = Post::new(
            alice.id,
            PostDraft {
                text: "ghost".to_string(),
                group_id: None,
            },
        );
        let result = BaseRepository::<Post, Uuid>::update(&db, ghost).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_post_requires_known_author_and_group() {
        let db = InMemoryDatabase::new();
        let stranger = User::new("ghost".to_string(), "hash".to_string());
        let orphan = Post::new(
            stranger.id,
            PostDraft {
                text: "text".to_string(),
                group_id: None,
            },
        );
        let result = BaseRepository::<Post, Uuid>::insert(&db, orphan).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }
}
