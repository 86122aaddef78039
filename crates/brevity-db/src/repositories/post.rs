//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use brevity_core::{NewPost, Post, PostId, PostRepository, PostWithAuthor, RepoResult};

use crate::mappers::{PostInsert, PostUpdate};
use crate::models::{PostModel, PostWithAuthorModel};

use super::error::{map_db_error, post_not_found};

/// Column list for a post joined with its author
const POST_WITH_AUTHOR_COLUMNS: &str = r"
    p.id, p.title, p.date_posted, p.content, p.user_id,
    u.username AS author_username,
    u.email AS author_email,
    u.image_file AS author_image_file
";

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, title, date_posted, content, user_id
            FROM post
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn find_with_author(&self, id: PostId) -> RepoResult<Option<PostWithAuthor>> {
        let sql = format!(
            r#"
            SELECT {POST_WITH_AUTHOR_COLUMNS}
            FROM post p
            INNER JOIN "user" u ON u.id = p.user_id
            WHERE p.id = $1
            "#
        );

        let result = sqlx::query_as::<_, PostWithAuthorModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(PostWithAuthor::from))
    }

    #[instrument(skip(self))]
    async fn list_with_authors(&self) -> RepoResult<Vec<PostWithAuthor>> {
        let sql = format!(
            r#"
            SELECT {POST_WITH_AUTHOR_COLUMNS}
            FROM post p
            INNER JOIN "user" u ON u.id = p.user_id
            ORDER BY p.id ASC
            "#
        );

        let rows = sqlx::query_as::<_, PostWithAuthorModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(PostWithAuthor::from).collect())
    }

    #[instrument(skip(self, post), fields(author_id = %post.author_id))]
    async fn create(&self, post: &NewPost) -> RepoResult<Post> {
        let insert = PostInsert::new(post);

        let model = sqlx::query_as::<_, PostModel>(
            r"
            INSERT INTO post (title, content, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, date_posted, content, user_id
            ",
        )
        .bind(insert.title)
        .bind(insert.content)
        .bind(insert.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Post::from(model))
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn update(&self, post: &Post) -> RepoResult<()> {
        let update = PostUpdate::new(post);

        let result = sqlx::query(
            r"
            UPDATE post
            SET title = $2, content = $3
            WHERE id = $1
            ",
        )
        .bind(update.id)
        .bind(update.title)
        .bind(update.content)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(post.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: PostId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM post WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(id));
        }

        Ok(())
    }
}
