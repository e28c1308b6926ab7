//! # Demo Content
//!
//! Everything Captr shows before a real backend exists: the notes document,
//! the seeded notes conversation, the canned replies, and the landing
//! carousel. Bundled as a [`Content`] value and handed to `App` at
//! construction, so tests and config can swap any piece out.

use crate::core::notes::Document;
use crate::core::transcript::{CodeBlock, Role};

pub const DEFAULT_CHAT_NAME: &str = "AI Notes Chat";

const BUNDLED_NOTES: &str = include_str!("../../assets/notes.md");

const NOTES_SUMMARY: &str = "Here's a summary of the YouTube video: It covers the basics of \
    Artificial Intelligence, including Machine Learning, Deep Learning, and Natural Language \
    Processing. It discusses real-world applications in healthcare, finance, autonomous \
    vehicles, and more. The video also highlights ethical considerations like bias, job \
    displacement, and privacy, and emphasizes the importance of responsible AI development. \
    Would you like to modify or add anything to these notes?";

const NOTES_FOLLOW_UP: &str =
    "Can you add a section about recent breakthroughs in AI, like GPT-4 and generative models?";

const NOTES_UPDATE: &str = "Absolutely! I've added a new section on recent breakthroughs:\n\n\
    Recent Breakthroughs in AI: The field has seen rapid progress with models like GPT-4, \
    which can generate human-like text, and other generative models that create images, \
    music, and more. These advancements are pushing the boundaries of what AI can achieve \
    in creativity and problem-solving.";

const NOTES_REPLY: &str = "Got it. I've noted your request against the video notes. \
    Live editing of the canvas isn't connected yet, so the document on the right stays as is \
    for now.";

const PROTOTYPE_REPLY: &str = "I've created a simple button component using shadcn/ui. \
    You can see the preview in the Preview tab and the code in the Code tab.";

const BUTTON_COMPONENT: &str = r#"import { Button } from "@/components/ui/button"

export default function ButtonComponent() {
  return (
    <div className="flex flex-col space-y-4 p-4">
      <h1 className="text-2xl font-bold">Button Component</h1>
      <div className="flex flex-wrap gap-4">
        <Button variant="default">Default</Button>
        <Button variant="destructive">Destructive</Button>
        <Button variant="outline">Outline</Button>
        <Button variant="secondary">Secondary</Button>
        <Button variant="ghost">Ghost</Button>
        <Button variant="link">Link</Button>
      </div>
    </div>
  )
}"#;

/// A canned assistant message: text plus optional code blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CannedReply {
    pub content: String,
    pub code_blocks: Vec<CodeBlock>,
}

/// One entry of the landing page carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoExample {
    pub title: &'static str,
    pub duration: &'static str,
    pub category: &'static str,
}

pub const VIDEO_EXAMPLES: &[VideoExample] = &[
    VideoExample { title: "Dynamic Programming By Abdul Bari", duration: "12:34", category: "Computer Science" },
    VideoExample { title: "The History of Renaissance Art", duration: "18:42", category: "Art History" },
    VideoExample { title: "Quantum Physics Explained Simply", duration: "15:28", category: "Physics" },
    VideoExample { title: "Machine Learning Fundamentals", duration: "22:15", category: "Technology" },
    VideoExample { title: "Ancient Rome: Rise and Fall", duration: "31:07", category: "History" },
    VideoExample { title: "Organic Chemistry Basics", duration: "14:53", category: "Chemistry" },
    VideoExample { title: "Psychology of Human Behavior", duration: "19:36", category: "Psychology" },
    VideoExample { title: "Financial Markets Overview", duration: "25:44", category: "Finance" },
];

/// Mock content injected into `App`.
#[derive(Debug, Clone)]
pub struct Content {
    pub chat_name: String,
    pub document: Document,
    /// Messages the notes conversation starts with.
    pub notes_seed: Vec<(Role, String)>,
    pub notes_reply: CannedReply,
    pub prototype_reply: CannedReply,
    pub videos: Vec<VideoExample>,
}

impl Default for Content {
    fn default() -> Self {
        Self {
            chat_name: DEFAULT_CHAT_NAME.to_string(),
            document: Document::new("Video Notes Canvas", BUNDLED_NOTES),
            notes_seed: vec![
                (Role::Assistant, NOTES_SUMMARY.to_string()),
                (Role::User, NOTES_FOLLOW_UP.to_string()),
                (Role::Assistant, NOTES_UPDATE.to_string()),
            ],
            notes_reply: CannedReply {
                content: NOTES_REPLY.to_string(),
                code_blocks: vec![],
            },
            prototype_reply: CannedReply {
                content: PROTOTYPE_REPLY.to_string(),
                code_blocks: vec![CodeBlock::new("code-1", "tsx", BUTTON_COMPONENT)],
            },
            videos: VIDEO_EXAMPLES.to_vec(),
        }
    }
}

/// Index of the carousel entry visible after `elapsed_ms`.
///
/// Returns 0 for an empty carousel or a zero interval.
pub fn carousel_index(elapsed_ms: u128, interval_ms: u64, len: usize) -> usize {
    if len == 0 || interval_ms == 0 {
        return 0;
    }
    ((elapsed_ms / u128::from(interval_ms)) % len as u128) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_content_matches_demo() {
        let content = Content::default();
        assert_eq!(content.chat_name, "AI Notes Chat");
        assert_eq!(content.notes_seed.len(), 3);
        assert_eq!(content.notes_seed[1].0, Role::User);
        assert_eq!(content.videos.len(), 8);
        assert!(content.document.markdown.contains("The Future of AI"));
    }

    #[test]
    fn prototype_reply_carries_tsx_block() {
        let content = Content::default();
        let block = &content.prototype_reply.code_blocks[0];
        assert_eq!(block.id, "code-1");
        assert_eq!(block.language, "tsx");
        assert!(block.code.contains("ButtonComponent"));
    }

    #[test]
    fn carousel_advances_every_interval_and_wraps() {
        assert_eq!(carousel_index(0, 3000, 8), 0);
        assert_eq!(carousel_index(2999, 3000, 8), 0);
        assert_eq!(carousel_index(3000, 3000, 8), 1);
        assert_eq!(carousel_index(3000 * 8, 3000, 8), 0);
        assert_eq!(carousel_index(3000 * 9 + 1, 3000, 8), 1);
    }

    #[test]
    fn carousel_degenerate_inputs() {
        assert_eq!(carousel_index(10_000, 3000, 0), 0);
        assert_eq!(carousel_index(10_000, 0, 8), 0);
    }
}
