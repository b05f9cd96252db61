//! End-to-end shaped tests for the content-graph flow:
//! register -> post -> comment -> like -> counts -> follow/unfollow.
//!
//! The store is modeled in memory with the same uniqueness and ownership
//! rules the SQL schema enforces, so the business flow can be exercised
//! without a database.

use std::collections::{HashMap, HashSet};

use lumen::validators;
use uuid::Uuid;

#[derive(Debug, PartialEq)]
enum StoreError {
    Conflict,
    NotFound,
    Forbidden,
    SelfFollow,
    SelfUnfollow,
}

#[derive(Clone, Debug)]
struct PostRow {
    id: Uuid,
    owner: Uuid,
    title: String,
    content: String,
    seq: u64,
}

#[derive(Default)]
struct Fixture {
    users: HashMap<Uuid, String>,
    usernames: HashSet<String>,
    posts: Vec<PostRow>,
    comments: Vec<(Uuid, Uuid)>,        // (post_id, author)
    likes: HashSet<(Uuid, Uuid)>,       // (post_id, user_id), cardinality 0/1
    follows: HashSet<(Uuid, Uuid)>,     // (follower, following), cardinality 0/1
    seq: u64,
}

impl Fixture {
    fn register(&mut self, username: &str) -> Result<Uuid, StoreError> {
        assert!(validators::validate_username(username));
        if !self.usernames.insert(username.to_string()) {
            return Err(StoreError::Conflict);
        }
        let id = Uuid::new_v4();
        self.users.insert(id, username.to_string());
        Ok(id)
    }

    fn create_post(&mut self, owner: Uuid, title: &str, content: &str) -> Uuid {
        assert!(!title.is_empty() && !content.is_empty());
        let id = Uuid::new_v4();
        self.seq += 1;
        self.posts.push(PostRow {
            id,
            owner,
            title: title.to_string(),
            content: content.to_string(),
            seq: self.seq,
        });
        id
    }

    fn update_post(&mut self, post_id: Uuid, requester: Uuid, title: &str) -> Result<(), StoreError> {
        // NotFound is decided before Forbidden.
        let post = self
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or(StoreError::NotFound)?;
        if post.owner != requester {
            return Err(StoreError::Forbidden);
        }
        post.title = title.to_string();
        Ok(())
    }

    fn comment(&mut self, post_id: Uuid, author: Uuid) -> Result<(), StoreError> {
        if !self.posts.iter().any(|p| p.id == post_id) {
            return Err(StoreError::NotFound);
        }
        self.comments.push((post_id, author));
        Ok(())
    }

    fn like(&mut self, post_id: Uuid, user: Uuid) -> Result<(), StoreError> {
        if !self.posts.iter().any(|p| p.id == post_id) {
            return Err(StoreError::NotFound);
        }
        // Conditional insert: zero rows affected surfaces as a conflict.
        if !self.likes.insert((post_id, user)) {
            return Err(StoreError::Conflict);
        }
        Ok(())
    }

    fn unlike(&mut self, post_id: Uuid, user: Uuid) -> Result<(), StoreError> {
        if !self.likes.remove(&(post_id, user)) {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn follow(&mut self, follower: Uuid, following: Uuid) -> Result<(), StoreError> {
        if follower == following {
            return Err(StoreError::SelfFollow);
        }
        if !self.follows.insert((follower, following)) {
            return Err(StoreError::Conflict);
        }
        Ok(())
    }

    fn unfollow(&mut self, follower: Uuid, following: Uuid) -> Result<(), StoreError> {
        // Explicit self check, distinct from the missing-edge rejection.
        if follower == following {
            return Err(StoreError::SelfUnfollow);
        }
        if !self.follows.remove(&(follower, following)) {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn like_count(&self, post_id: Uuid) -> usize {
        self.likes.iter().filter(|(p, _)| *p == post_id).count()
    }

    fn comment_count(&self, post_id: Uuid) -> usize {
        self.comments.iter().filter(|(p, _)| *p == post_id).count()
    }

    fn followers(&self, user: Uuid) -> Vec<Uuid> {
        self.follows
            .iter()
            .filter(|(_, f)| *f == user)
            .map(|(follower, _)| *follower)
            .collect()
    }

    fn list_posts_desc(&self) -> Vec<&PostRow> {
        let mut posts: Vec<&PostRow> = self.posts.iter().collect();
        posts.sort_by(|a, b| b.seq.cmp(&a.seq));
        posts
    }
}

#[test]
fn test_duplicate_registration_conflicts() {
    let mut fx = Fixture::default();
    fx.register("alice").unwrap();
    assert_eq!(fx.register("alice"), Err(StoreError::Conflict));
    assert_eq!(fx.usernames.len(), 1);
    assert_eq!(fx.users.len(), 1);
}

#[test]
fn test_double_like_conflicts_and_count_is_stable() {
    let mut fx = Fixture::default();
    let a = fx.register("alice").unwrap();
    let b = fx.register("bob").unwrap();
    let post = fx.create_post(a, "hello", "first post");

    assert!(fx.like(post, b).is_ok());
    assert_eq!(fx.like_count(post), 1);

    assert_eq!(fx.like(post, b), Err(StoreError::Conflict));
    assert_eq!(fx.like_count(post), 1);
}

#[test]
fn test_unlike_without_like_is_not_found() {
    let mut fx = Fixture::default();
    let a = fx.register("alice").unwrap();
    let b = fx.register("bob").unwrap();
    let post = fx.create_post(a, "hello", "first post");

    assert_eq!(fx.unlike(post, b), Err(StoreError::NotFound));
    assert_eq!(fx.like_count(post), 0);
}

#[test]
fn test_self_follow_always_rejected() {
    let mut fx = Fixture::default();
    let a = fx.register("alice").unwrap();

    assert_eq!(fx.follow(a, a), Err(StoreError::SelfFollow));
    assert_eq!(fx.follow(a, a), Err(StoreError::SelfFollow));
    assert!(fx.follows.is_empty());
}

#[test]
fn test_self_unfollow_is_distinct_from_not_following() {
    let mut fx = Fixture::default();
    let a = fx.register("alice").unwrap();
    let b = fx.register("bob").unwrap();

    assert_eq!(fx.unfollow(a, a), Err(StoreError::SelfUnfollow));
    assert_eq!(fx.unfollow(a, b), Err(StoreError::NotFound));
}

#[test]
fn test_non_owner_update_is_forbidden_and_post_unchanged() {
    let mut fx = Fixture::default();
    let a = fx.register("alice").unwrap();
    let b = fx.register("bob").unwrap();
    let post = fx.create_post(a, "original", "body");

    assert_eq!(fx.update_post(post, b, "hijacked"), Err(StoreError::Forbidden));

    let row = fx.posts.iter().find(|p| p.id == post).unwrap();
    assert_eq!(row.title, "original");
    assert_eq!(row.content, "body");
    assert_eq!(row.owner, a);

    // Missing resource wins over ownership.
    assert_eq!(
        fx.update_post(Uuid::new_v4(), b, "x"),
        Err(StoreError::NotFound)
    );
}

#[test]
fn test_listing_orders_newest_first_with_correct_counts() {
    let mut fx = Fixture::default();
    let a = fx.register("alice").unwrap();
    let b = fx.register("bob").unwrap();

    let p1 = fx.create_post(a, "one", "1");
    let p2 = fx.create_post(b, "two", "2");
    let p3 = fx.create_post(a, "three", "3");

    fx.like(p2, a).unwrap();
    fx.comment(p2, a).unwrap();

    let listed: Vec<Uuid> = fx.list_posts_desc().iter().map(|p| p.id).collect();
    assert_eq!(listed, vec![p3, p2, p1]);

    assert_eq!(fx.like_count(p1), 0);
    assert_eq!(fx.comment_count(p1), 0);
    assert_eq!(fx.like_count(p2), 1);
    assert_eq!(fx.comment_count(p2), 1);
    assert_eq!(fx.like_count(p3), 0);
}

#[test]
fn test_full_social_flow() {
    let mut fx = Fixture::default();
    let a = fx.register("alice").unwrap();
    let b = fx.register("bob").unwrap();

    // A posts, B engages.
    let post = fx.create_post(a, "hello world", "my first post");
    fx.comment(post, b).unwrap();
    fx.like(post, b).unwrap();

    assert_eq!(fx.like_count(post), 1);
    assert_eq!(fx.comment_count(post), 1);

    // A follows B, shows up in B's followers, then disappears on unfollow.
    fx.follow(a, b).unwrap();
    assert!(fx.followers(b).contains(&a));

    fx.unfollow(a, b).unwrap();
    assert!(!fx.followers(b).contains(&a));
}

#[test]
fn test_comment_on_missing_post_is_rejected() {
    let mut fx = Fixture::default();
    let a = fx.register("alice").unwrap();

    assert_eq!(fx.comment(Uuid::new_v4(), a), Err(StoreError::NotFound));
    assert!(fx.comments.is_empty());
}
