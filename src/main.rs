use axum::{
    Router,
    extract::Extension,
    routing::{delete, get},
};
use forum_backend::content::handlers::{
    handle_create_comment, handle_create_post, handle_delete_comment, handle_delete_post,
    handle_get_comment, handle_get_post, handle_get_tagset, handle_list_comments,
    handle_list_posts, handle_update_post, handle_update_tagset,
};
use forum_backend::content::types::{Comment, Post};
use forum_backend::engagement::handlers::{
    handle_create_tag, handle_create_vote, handle_delete_tag, handle_get_vote, handle_list_tags,
    handle_list_votes, handle_tag_validation,
};
use forum_backend::engagement::types::{Tag, Vote};
use forum_backend::moderation::handlers::{
    handle_active_ban, handle_create_ban, handle_create_invite, handle_delete_ban,
    handle_get_ban, handle_get_invite, handle_list_bans, handle_list_invites,
};
use forum_backend::moderation::types::{Ban, Invite};
use forum_backend::search::handlers::{handle_search_comments, handle_search_posts};
use forum_backend::storage::memory::MemoryStore;
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut bind_addr: SocketAddr = "127.0.0.1:6000".parse()?;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = args[i + 1].parse()?;
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    tracing::info!("Starting forum backend on {}", bind_addr);

    // 1. Stores (one per entity kind):
    let posts = Arc::new(MemoryStore::<Post>::new());
    let comments = Arc::new(MemoryStore::<Comment>::new());
    let tags = Arc::new(MemoryStore::<Tag>::new());
    let votes = Arc::new(MemoryStore::<Vote>::new());
    let bans = Arc::new(MemoryStore::<Ban>::new());
    let invites = Arc::new(MemoryStore::<Invite>::new());

    // 2. HTTP Router:
    let app = Router::new()
        .route("/posts", get(handle_list_posts).post(handle_create_post))
        .route("/posts/search", get(handle_search_posts))
        .route(
            "/posts/:id",
            get(handle_get_post)
                .put(handle_update_post)
                .delete(handle_delete_post),
        )
        .route(
            "/posts/:id/tagset",
            get(handle_get_tagset).post(handle_update_tagset),
        )
        .route(
            "/comments",
            get(handle_list_comments).post(handle_create_comment),
        )
        .route("/comments/search", get(handle_search_comments))
        .route(
            "/comments/:id",
            get(handle_get_comment).delete(handle_delete_comment),
        )
        .route("/tags", get(handle_list_tags).post(handle_create_tag))
        .route("/tags/validation", get(handle_tag_validation))
        .route("/tags/:id", delete(handle_delete_tag))
        .route("/votes", get(handle_list_votes).post(handle_create_vote))
        .route("/votes/:id", get(handle_get_vote))
        .route("/bans", get(handle_list_bans).post(handle_create_ban))
        .route("/bans/active", get(handle_active_ban))
        .route("/bans/:id", get(handle_get_ban).delete(handle_delete_ban))
        .route(
            "/invites",
            get(handle_list_invites).post(handle_create_invite),
        )
        .route("/invites/:id", get(handle_get_invite))
        .layer(Extension(posts))
        .layer(Extension(comments))
        .layer(Extension(tags))
        .layer(Extension(votes))
        .layer(Extension(bans))
        .layer(Extension(invites));

    // 3. Serve:
    tracing::info!("HTTP server listening on {}", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
