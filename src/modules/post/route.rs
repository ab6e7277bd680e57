use crate::modules::post::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/posts")
            .service(create_post)
            .service(get_feed)
            .service(get_user_posts)
            .service(delete_comment)
            .service(create_comment)
            .service(get_comments)
            .service(like_post)
            .service(unlike_post)
            .service(get_post)
            .service(update_post)
            .service(delete_post),
    );
}
