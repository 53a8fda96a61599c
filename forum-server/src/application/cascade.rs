//! Delete orders shared by the services. Children always go before their parent.

use crate::data::cascade::CascadeTx;
use crate::domain::error::DomainError;

/// Deletes a post and its replies. Returns `false` when the post did not exist.
pub(crate) async fn delete_post_tree(
    tx: &mut dyn CascadeTx,
    post_id: i64,
) -> Result<bool, DomainError> {
    for reply_id in tx.reply_ids_by_post(post_id).await? {
        tx.delete_reply(reply_id).await?;
    }
    tx.delete_post(post_id).await
}

/// Deletes a thread, its posts and their replies.
pub(crate) async fn delete_thread_tree(
    tx: &mut dyn CascadeTx,
    thread_id: i64,
) -> Result<bool, DomainError> {
    for post_id in tx.post_ids_by_thread(thread_id).await? {
        delete_post_tree(tx, post_id).await?;
    }
    tx.delete_thread(thread_id).await
}

/// Deletes everything a user authored, then the user.
pub(crate) async fn delete_user_tree(
    tx: &mut dyn CascadeTx,
    user_id: i64,
) -> Result<bool, DomainError> {
    for reply_id in tx.reply_ids_by_author(user_id).await? {
        tx.delete_reply(reply_id).await?;
    }
    for post_id in tx.post_ids_by_author(user_id).await? {
        delete_post_tree(tx, post_id).await?;
    }
    for thread_id in tx.thread_ids_by_author(user_id).await? {
        delete_thread_tree(tx, thread_id).await?;
    }
    tx.delete_user(user_id).await
}
