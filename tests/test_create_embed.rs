use interactions::builder::{
    CreateEmbed,
    CreateEmbedAuthor,
    CreateEmbedFooter,
    CreateInteractionResponseMessage,
    Validate,
};
use interactions::model::ValidationError;
use interactions::utils::Colour;
use serde_json::json;

#[test]
fn test_embed_json() {
    let embed = CreateEmbed::new()
        .colour(Colour::new(0xFF0000))
        .unwrap()
        .description("This is a hakase description")
        .unwrap()
        .fields([("a", "b", false), ("c", "z", true)])
        .unwrap()
        .image("https://i.imgur.com/XfWpfCV.gif")
        .unwrap()
        .title("still a hakase")
        .unwrap()
        .url("https://i.imgur.com/XfWpfCV.gif")
        .unwrap();

    let built = embed.to_json().unwrap();

    let obj = json!({
        "color": 0xFF0000,
        "description": "This is a hakase description",
        "fields": [
            {"inline": false, "name": "a", "value": "b"},
            {"inline": true, "name": "c", "value": "z"},
        ],
        "image": {"url": "https://i.imgur.com/XfWpfCV.gif"},
        "title": "still a hakase",
        "type": "rich",
        "url": "https://i.imgur.com/XfWpfCV.gif",
    });

    assert_eq!(built, obj);
}

#[test]
fn test_author_and_footer() {
    let embed = CreateEmbed::new()
        .author(
            CreateEmbedAuthor::new("hakase")
                .unwrap()
                .icon_url("attachment://avatar.png")
                .unwrap(),
        )
        .footer(CreateEmbedFooter::new("page 1/2").unwrap());

    let built = embed.to_json().unwrap();
    assert_eq!(built["author"], json!({"name": "hakase", "icon_url": "attachment://avatar.png"}));
    assert_eq!(built["footer"], json!({"text": "page 1/2"}));
}

#[test]
fn test_embed_limits() {
    assert!(matches!(
        CreateEmbed::new().title("t".repeat(300)),
        Err(ValidationError::TooLarge { .. })
    ));
    assert!(matches!(
        CreateEmbed::new().url("ftp://example.com"),
        Err(ValidationError::InvalidUrl { .. })
    ));

    // Eleven embeds do not fit in one message.
    let embeds = (0..11).map(|i| CreateEmbed::new().title(format!("{i}")).unwrap());
    assert!(CreateInteractionResponseMessage::new().embeds(embeds).is_err());
}
