//! HTTP handlers and route configuration.

mod blogs;
mod health;


use actix_web::web;
use blog_core::query::Feed;

use crate::middleware::error::json_error_handler;
use crate::state::AppState;

/// Fixed home-page feeds and the paths they are served on.
pub const FEED_ROUTES: [(&str, Feed); 5] = [
    ("/recentBlogs", Feed::Recent),
    ("/recentBlogsApps", Feed::RecentApps),
    ("/recentHeroBlog", Feed::Hero),
    ("/recentTechnologyBlog", Feed::RecentTechnology),
    ("/recentGadgetBlogs", Feed::RecentGadget),
];

/// JSON body settings shared by the write routes.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(json_error_handler)
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::liveness))
        .route("/health", web::get().to(health::health_check));

    for (path, feed) in FEED_ROUTES {
        cfg.route(
            path,
            web::get().to(move |state: web::Data<AppState>| blogs::feed(state, feed)),
        );
    }

    cfg.route("/blog/{id}", web::get().to(blogs::get_blog))
        .route("/similarBlogs/{category}", web::get().to(blogs::similar_blogs))
        .route("/addComment/{id}", web::put().to(blogs::add_comment))
        .route("/addBlog", web::post().to(blogs::add_blog))
        .route("/userBlogs/{email}", web::get().to(blogs::user_blogs))
        .route("/categoryBlogs/{category}", web::get().to(blogs::category_blogs));
}
