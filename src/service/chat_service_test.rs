use super::*;
use crate::store;

fn service() -> ChatService {
    let store = store::empty();
    ChatService::new(
        ConversationRepository::new(store.clone()),
        MessageRepository::new(store),
        SimulatedAgentService::new(),
        Latency::none(),
    )
}

fn request(conversation_id: Option<&str>, message: &str) -> ChatRequest {
    ChatRequest {
        conversation_id: conversation_id.map(str::to_string),
        message: message.to_string(),
    }
}

// ── derive_title ─────────────────────────────────────────────────────────────

#[test]
fn short_titles_are_kept_verbatim() {
    assert_eq!(derive_title("Hello"), "Hello");
}

#[test]
fn titles_are_trimmed_before_measuring() {
    assert_eq!(derive_title("  Hello  "), "Hello");
}

#[test]
fn long_titles_are_cut_to_thirty_chars_plus_marker() {
    let title = derive_title(&"a".repeat(40));
    assert_eq!(title.len(), 33);
    assert!(title.ends_with("..."));
    assert_eq!(&title[..30], &"a".repeat(30));
}

#[test]
fn truncation_counts_chars_not_bytes() {
    let title = derive_title(&"é".repeat(40));
    assert_eq!(title.chars().count(), 33);
    assert!(title.ends_with("..."));
}

// ── chat ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn each_new_chat_creates_a_distinct_conversation() {
    let svc = service();
    let a = svc.chat(request(None, "first")).await.unwrap();
    let b = svc.chat(request(None, "second")).await.unwrap();
    assert_ne!(a.conversation_id, b.conversation_id);

    let conversations = svc.get_conversations().await;
    assert_eq!(conversations.len(), 2);
    assert!(conversations.iter().any(|c| c.id == a.conversation_id));
    assert!(conversations.iter().any(|c| c.id == b.conversation_id));
}

#[tokio::test]
async fn each_send_appends_a_user_and_assistant_pair() {
    let svc = service();
    let first = svc.chat(request(None, "turn one")).await.unwrap();
    let id = first.conversation_id.clone();
    svc.chat(request(Some(&id), "turn two")).await.unwrap();
    svc.chat(request(Some(&id), "turn three")).await.unwrap();

    let messages = svc.get_messages(&id).await;
    assert_eq!(messages.len(), 6);
    for pair in messages.chunks(2) {
        assert_eq!(pair[0].role, MessageRole::User);
        assert_eq!(pair[1].role, MessageRole::Assistant);
    }
    for window in messages.windows(2) {
        assert!(window[0].created_at <= window[1].created_at);
    }
}

#[tokio::test]
async fn chat_returns_both_created_messages() {
    let svc = service();
    let response = svc.chat(request(None, "What is a monad?")).await.unwrap();

    assert_eq!(response.user_message.content, "What is a monad?");
    assert_eq!(response.user_message.role, MessageRole::User);
    assert_eq!(response.assistant_message.role, MessageRole::Assistant);
    assert_eq!(response.user_message.conversation_id, response.conversation_id);
    assert_eq!(response.assistant_message.conversation_id, response.conversation_id);
}

#[tokio::test]
async fn blank_message_is_rejected_without_touching_the_store() {
    let svc = service();
    let err = svc.chat(request(None, "   ")).await.unwrap_err();
    assert!(err.is_validation());
    assert!(svc.get_conversations().await.is_empty());
}

#[tokio::test]
async fn overlong_message_is_rejected() {
    let svc = service();
    let err = svc.chat(request(None, &"x".repeat(8001))).await.unwrap_err();
    assert!(matches!(err, AppError::FieldTooLong { .. }));
}

#[tokio::test]
async fn first_message_becomes_the_title() {
    let svc = service();
    let response = svc.chat(request(None, "Hello")).await.unwrap();

    let conversations = svc.get_conversations().await;
    let created = conversations.iter().find(|c| c.id == response.conversation_id).unwrap();
    assert_eq!(created.title, "Hello");
}

#[tokio::test]
async fn forty_char_first_message_yields_a_thirty_three_char_title() {
    let svc = service();
    let response = svc.chat(request(None, &"m".repeat(40))).await.unwrap();

    let conversations = svc.get_conversations().await;
    let created = conversations.iter().find(|c| c.id == response.conversation_id).unwrap();
    assert_eq!(created.title.len(), 33);
}

#[tokio::test]
async fn later_sends_do_not_change_the_title() {
    let svc = service();
    let first = svc.chat(request(None, "Original question")).await.unwrap();
    svc.chat(request(Some(&first.conversation_id), "Different follow-up"))
        .await
        .unwrap();

    let conversations = svc.get_conversations().await;
    assert_eq!(conversations[0].title, "Original question");
}

#[tokio::test]
async fn directory_entry_tracks_the_last_user_message() {
    let svc = service();
    let first = svc.chat(request(None, "first question")).await.unwrap();
    svc.chat(request(Some(&first.conversation_id), "follow-up"))
        .await
        .unwrap();

    let conversations = svc.get_conversations().await;
    assert_eq!(conversations[0].last_message, "follow-up");
}

#[tokio::test]
async fn send_with_an_unadvertised_id_creates_the_directory_entry() {
    // A client may hold an id the store has never seen (e.g. after a restart);
    // the conversation is created under that id so no message is orphaned.
    let svc = service();
    svc.chat(request(Some("adopted-id"), "hi")).await.unwrap();

    assert!(svc.get_conversations().await.iter().any(|c| c.id == "adopted-id"));
    assert_eq!(svc.get_messages("adopted-id").await.len(), 2);
}

// ── transcript ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn transcript_for_an_unknown_id_is_empty() {
    let svc = service();
    assert!(svc.get_messages("missing").await.is_empty());
}

// ── directory ordering ───────────────────────────────────────────────────────

#[tokio::test]
async fn directory_is_ordered_most_recently_updated_first() {
    let svc = service();
    let a = svc.chat(request(None, "conversation a")).await.unwrap();
    let b = svc.chat(request(None, "conversation b")).await.unwrap();
    let c = svc.chat(request(None, "conversation c")).await.unwrap();

    // Sending to the oldest conversation moves it to the front.
    svc.chat(request(Some(&a.conversation_id), "revisited")).await.unwrap();

    let conversations = svc.get_conversations().await;
    assert_eq!(conversations[0].id, a.conversation_id);
    assert_eq!(conversations[1].id, c.conversation_id);
    assert_eq!(conversations[2].id, b.conversation_id);
    for window in conversations.windows(2) {
        assert!(window[0].updated_at >= window[1].updated_at);
    }
}

// ── rename ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn rename_is_idempotent_in_effect() {
    let svc = service();
    let created = svc.chat(request(None, "to rename")).await.unwrap();

    svc.rename_conversation(&created.conversation_id, "Renamed").await.unwrap();
    let again = svc
        .rename_conversation(&created.conversation_id, "Renamed")
        .await
        .unwrap();
    assert_eq!(again.title, "Renamed");
}

#[tokio::test]
async fn rename_trims_the_new_title() {
    let svc = service();
    let created = svc.chat(request(None, "to rename")).await.unwrap();

    let renamed = svc
        .rename_conversation(&created.conversation_id, "  Padded  ")
        .await
        .unwrap();
    assert_eq!(renamed.title, "Padded");
}

#[tokio::test]
async fn rename_with_a_blank_title_is_rejected() {
    let svc = service();
    let created = svc.chat(request(None, "to rename")).await.unwrap();

    let err = svc
        .rename_conversation(&created.conversation_id, "   ")
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn rename_of_an_unknown_id_fails_not_found() {
    let svc = service();
    let err = svc.rename_conversation("missing", "Anything").await.unwrap_err();
    assert!(err.is_not_found());
}

// ── delete ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_the_conversation_and_its_transcript() {
    let svc = service();
    let created = svc.chat(request(None, "to delete")).await.unwrap();
    let id = created.conversation_id;

    svc.delete_conversation(&id).await.unwrap();

    assert!(svc.get_messages(&id).await.is_empty());
    assert!(!svc.get_conversations().await.iter().any(|c| c.id == id));
}

#[tokio::test]
async fn deleting_twice_fails_the_second_time() {
    let svc = service();
    let created = svc.chat(request(None, "to delete")).await.unwrap();

    svc.delete_conversation(&created.conversation_id).await.unwrap();
    let err = svc.delete_conversation(&created.conversation_id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn delete_of_an_unknown_id_fails_not_found() {
    let svc = service();
    let err = svc.delete_conversation("missing").await.unwrap_err();
    assert!(err.is_not_found());
}
