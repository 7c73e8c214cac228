//! Tutor features and their prompt builders.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::request::{ChatTurn, ImageInput, TutorRequest};

pub const GREETING: &str = "আসসালামু আলাইকুম";

const STUDY_INSTRUCTION: &str = "You are a friendly teacher. Explain complex concepts in very simple Bengali with stories and examples. MANDATORY: Start every response with the Bengali greeting 'আসসালামু আলাইকুম'. NEVER use 'Namaskar' or any other greeting. Be warm and encouraging.";

const MATH_INSTRUCTION: &str = "You are 'Math Wizard Master'. Solve problems accurately. STRICT RULES: 1. No LaTeX/delimiters. 2. Use symbols (+, -, ×, ÷) for operations. 3. Explain in simple Bengali. 4. MANDATORY: Start with 'আসসালামু আলাইকুম'.";

const TRANSLATION_INSTRUCTION: &str = "You are a language teacher.
If translating BN to EN: Return the English sentence and the pronunciation in Bengali letters.
If translating EN to BN: Return the Bengali sentence and the pronunciation in Bengali letters.
Format your response strictly as:
TRANSLATION: [The translated text]
PRONUNCIATION: [The pronunciation guide in Bengali script]";

const SPELLING_INSTRUCTION: &str = "You are a language expert and spelling teacher. Help students correct their spelling and learn the rules. Always explain in simple Bengali. MANDATORY: Start every response with the Bengali greeting 'আসসালামু আলাইকুম'.";

const QUESTION_INSTRUCTION: &str = "Answer educational or general knowledge questions simply in Bengali. MANDATORY: Start every response with the Bengali greeting 'আসসালামু আলাইকুম'. NEVER use 'Namaskar' or any other greeting.";

const SCRIPT_INSTRUCTION: &str = "You are a creative scriptwriter and content creator. You help students write speeches, video scripts, and presentations. Always provide high-quality, structured content. MANDATORY: Start every response with the Bengali greeting 'আসসালামু আলাইকুম'.";

const FRIEND_INSTRUCTION: &str = "You are 'StudyBuddy AI Friend', an expert English tutor who talks like a best friend.
- MISSION: Help the student learn English by chatting.
- GREETING: The first message ever sent by the bot started with 'আসসালামু আলাইকুম'. Never repeat this greeting again.
- ERROR CORRECTION (CRITICAL): Check every English sentence the user writes.
- If there is an error:
  1. Start by saying something like \"Oops, a tiny mistake! (ওহ, ছোট একটা ভুল!)\" in Bengali.
  2. Explain the mistake clearly in simple Bengali.
  3. Show the correct English sentence.
  4. Then reply to their message in simple English to keep the conversation going.
- If there is no error:
  1. Praise them briefly (e.g., \"Perfect sentence!\", \"সঠিক হয়েছে!\")
  2. Continue the chat in simple English.
- Use very easy English (A1/A2 level). Do not use complex words.
- Be extremely encouraging and kind.";

const GOAL_INSTRUCTION: &str = "You are an English teacher. Evaluate the user's sentence. If it's acceptable for a beginner, output 'SUCCESS'. If not, provide a short correction in Bengali.";

const STUDY_GUIDANCE: &str = "একটি উদাহরণ এবং ছোট গল্প ব্যবহার করো যাতে বুঝতে সুবিধা হয়। বুঝাও যে আমি একদম বেসিক লেভেলে বুঝতে চাই। শুরুতে অবশ্যই \"আসসালামু আলাইকুম\" বলবে।";

const MATH_TAIL: &str = "Explain steps clearly in Bengali. Use symbols (+, -, ×, ÷) only. Start with 'আসসালামু আলাইকুম'.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum Language {
    #[strum(serialize = "bn")]
    Bengali,
    #[strum(serialize = "en")]
    English,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum Direction {
    #[strum(serialize = "bn-en")]
    BengaliToEnglish,
    #[strum(serialize = "en-bn")]
    EnglishToBengali,
}

/// A single tutor feature invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TutorTask {
    Study {
        topic: String,
        image: Option<ImageInput>,
    },
    Math {
        problem: String,
        image: Option<ImageInput>,
    },
    Translate {
        text: String,
        direction: Direction,
    },
    Spelling {
        text: String,
        language: Language,
    },
    Question {
        question: String,
        image: Option<ImageInput>,
    },
    Script {
        topic: String,
        language: Language,
    },
    /// Multi-turn chat. The full history is resent every turn.
    FriendChat {
        history: Vec<ChatTurn>,
        message: String,
    },
    GoalCheck {
        sentence: String,
    },
}

impl TutorTask {
    pub fn name(&self) -> &'static str {
        match self {
            TutorTask::Study { .. } => "study",
            TutorTask::Math { .. } => "math",
            TutorTask::Translate { .. } => "translate",
            TutorTask::Spelling { .. } => "spelling",
            TutorTask::Question { .. } => "question",
            TutorTask::Script { .. } => "script",
            TutorTask::FriendChat { .. } => "friend_chat",
            TutorTask::GoalCheck { .. } => "goal_check",
        }
    }

    /// Blank text with no image is not sent.
    pub fn is_blank(&self) -> bool {
        match self {
            TutorTask::Study { topic: text, image }
            | TutorTask::Math {
                problem: text,
                image,
            }
            | TutorTask::Question {
                question: text,
                image,
            } => text.trim().is_empty() && image.is_none(),
            TutorTask::Translate { text, .. }
            | TutorTask::Spelling { text, .. }
            | TutorTask::Script { topic: text, .. }
            | TutorTask::FriendChat { message: text, .. }
            | TutorTask::GoalCheck { sentence: text } => text.trim().is_empty(),
        }
    }

    pub fn build_request(&self) -> TutorRequest {
        match self {
            TutorTask::Study { topic, image } => match image {
                Some(image) => TutorRequest::new(STUDY_INSTRUCTION)
                    .with_image(image.clone())
                    .with_text(format!("এই ছবির টপিকটি সহজে বাংলায় ব্যাখ্যা করো। {STUDY_GUIDANCE}")),
                None => TutorRequest::new(STUDY_INSTRUCTION)
                    .with_text(format!(
                        "টপিক: \"{}\"। এই টপিকটি সহজে বাংলায় ব্যাখ্যা করো। {STUDY_GUIDANCE}",
                        topic.trim()
                    )),
            },
            TutorTask::Math { problem, image } => match image {
                Some(image) => TutorRequest::new(MATH_INSTRUCTION)
                    .with_image(image.clone())
                    .with_text(format!("Solve the math problem in this image. {MATH_TAIL}")),
                None => TutorRequest::new(MATH_INSTRUCTION).with_text(format!(
                    "Solve this math problem: \"{}\". {MATH_TAIL}",
                    problem.trim()
                )),
            },
            TutorTask::Translate { text, direction } => {
                let prompt = match direction {
                    Direction::BengaliToEnglish => format!(
                        "বাংলা: \"{}\"। এর সঠিক ইংরেজি অনুবাদ এবং বাংলা অক্ষরে উচ্চারণ নির্দেশিকা দাও।",
                        text.trim()
                    ),
                    Direction::EnglishToBengali => format!(
                        "English: \"{}\". Provide its correct Bengali translation and pronunciation guide in Bengali letters.",
                        text.trim()
                    ),
                };
                TutorRequest::new(TRANSLATION_INSTRUCTION).with_text(prompt)
            }
            TutorTask::Spelling { text, language } => {
                let prompt = match language {
                    Language::Bengali => format!(
                        "নিচের বাংলা লেখাটির বানান চেক করো: \"{}\"। যদি ভুল থাকে তবে সঠিক বানানটি দাও এবং কেন ভুল হয়েছে বা সঠিক নিয়মটি কী তা সহজ বাংলায় বুঝিয়ে বলো। যদি সব সঠিক থাকে তবে \"অভিনন্দন, সব সঠিক আছে!\" বলো।",
                        text.trim()
                    ),
                    Language::English => format!(
                        "Check the spelling and grammar of this English text: \"{}\". If there are errors, provide the corrected version and explain the mistakes in simple Bengali. If everything is correct, say \"অভিনন্দন, সব সঠিক আছে!\"",
                        text.trim()
                    ),
                };
                TutorRequest::new(SPELLING_INSTRUCTION).with_text(prompt)
            }
            TutorTask::Question { question, image } => match image {
                Some(image) => TutorRequest::new(QUESTION_INSTRUCTION)
                    .with_image(image.clone())
                    .with_text(format!(
                        "এই ছবিতে থাকা প্রশ্নটির উত্তর দাও। উত্তরটি সহজে বাংলায় বুঝিয়ে দাও। শুরুতে অবশ্যই \"{GREETING}\" বলবে।"
                    )),
                None => TutorRequest::new(QUESTION_INSTRUCTION).with_text(format!(
                    "{}। উত্তর দাও এবং শুরুতে \"{GREETING}\" বলো।",
                    question.trim()
                )),
            },
            TutorTask::Script { topic, language } => {
                let prompt = match language {
                    Language::Bengali => format!(
                        "টপিক: \"{}\"। এই টপিকটির ওপর একটি চমৎকার স্ক্রিপ্ট লেখো বাংলা ভাষায়। এটি হতে পারে কোনো বক্তব্য (Speech), ইউটিউব ভিডিওর চিত্রনাট্য (YouTube Script) বা ছোট নাটকের অংশ। খুব সাবলীল ভাষায় এবং আকর্ষণীয়ভাবে লেখো। শুরুতে অবশ্যই \"{GREETING}\" বলবে।",
                        topic.trim()
                    ),
                    Language::English => format!(
                        "Topic: \"{}\". Write an excellent script on this topic in English. It could be a Speech, a YouTube Video Script, or a Short Play segment. Write it in an engaging and creative way. Start with the Bengali greeting \"{GREETING}\" but write the rest in English.",
                        topic.trim()
                    ),
                };
                TutorRequest::new(SCRIPT_INSTRUCTION).with_text(prompt)
            }
            TutorTask::FriendChat { history, message } => TutorRequest::new(FRIEND_INSTRUCTION)
                .with_history(history.clone())
                .with_text(message.trim()),
            TutorTask::GoalCheck { sentence } => TutorRequest::new(GOAL_INSTRUCTION).with_text(format!(
                "Check if this sentence is grammatically correct English: \"{}\". If it is correct enough for a beginner, say \"SUCCESS\". Otherwise, explain the mistake briefly in Bengali.",
                sentence.trim()
            )),
        }
    }
}

/// Prompt sent to the speech model.
pub fn speech_prompt(text: &str) -> String {
    format!("Say clearly: {}", text.trim())
}
