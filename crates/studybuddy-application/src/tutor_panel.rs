//! One tutor feature screen with a single in-flight request.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use studybuddy_core::tutor::{
    EMPTY_REPLY_FALLBACK, SpeechClip, TaskOutcome, TutorAgent, TutorReply, TutorTask,
};

/// Clears the flag it acquired when dropped, including on early return and
/// cancellation.
struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlight<'a> {
    fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Runs tutor tasks against an agent.
///
/// A submission while a request is loading is answered with
/// [`TaskOutcome::Busy`] and never reaches the agent. Agent failures are
/// logged and turned into a fallback message. Speech playback has its own
/// flag so a translation can be read aloud while another request runs.
pub struct TutorPanel {
    agent: Arc<dyn TutorAgent>,
    loading: AtomicBool,
    speaking: AtomicBool,
}

impl TutorPanel {
    pub fn new(agent: Arc<dyn TutorAgent>) -> Self {
        Self {
            agent,
            loading: AtomicBool::new(false),
            speaking: AtomicBool::new(false),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::Acquire)
    }

    pub async fn run(&self, task: TutorTask) -> TaskOutcome {
        if task.is_blank() {
            return TaskOutcome::Ignored;
        }
        let Some(_in_flight) = InFlight::try_acquire(&self.loading) else {
            tracing::debug!(task = task.name(), "tutor request already in flight");
            return TaskOutcome::Busy;
        };

        match self.agent.generate(task.build_request()).await {
            Ok(raw) => {
                let raw = if raw.trim().is_empty() {
                    EMPTY_REPLY_FALLBACK
                } else {
                    raw.as_str()
                };
                TaskOutcome::Completed(TutorReply::parse(&task, raw))
            }
            Err(e) => {
                tracing::warn!(task = task.name(), error = %e, "tutor request failed");
                TaskOutcome::failed()
            }
        }
    }

    pub async fn speak(&self, text: &str) -> TaskOutcome<SpeechClip> {
        if text.trim().is_empty() {
            return TaskOutcome::Ignored;
        }
        let Some(_in_flight) = InFlight::try_acquire(&self.speaking) else {
            return TaskOutcome::Busy;
        };

        match self.agent.synthesize_speech(text).await {
            Ok(clip) => TaskOutcome::Completed(clip),
            Err(e) => {
                tracing::warn!(error = %e, "speech synthesis failed");
                TaskOutcome::failed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;
    use studybuddy_core::error::{Result, StudyBuddyError};
    use studybuddy_core::tutor::{Direction, FAILURE_FALLBACK, TutorRequest};
    use tokio::sync::Notify;

    /// Replies from a script, one entry per call.
    struct ScriptedAgent {
        replies: Mutex<Vec<Result<String>>>,
        calls: AtomicUsize,
    }

    impl ScriptedAgent {
        fn new(replies: Vec<Result<String>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TutorAgent for ScriptedAgent {
        async fn generate(&self, _request: TutorRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.replies.lock().unwrap().remove(0)
        }

        async fn synthesize_speech(&self, _text: &str) -> Result<SpeechClip> {
            SpeechClip::from_base64_pcm("AAABAA==")
        }
    }

    /// Blocks inside `generate` until released.
    struct GatedAgent {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl TutorAgent for GatedAgent {
        async fn generate(&self, _request: TutorRequest) -> Result<String> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok("done".to_string())
        }

        async fn synthesize_speech(&self, _text: &str) -> Result<SpeechClip> {
            Err(StudyBuddyError::remote("no audio"))
        }
    }

    fn study(topic: &str) -> TutorTask {
        TutorTask::Study {
            topic: topic.into(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_completed_reply() {
        let panel = TutorPanel::new(Arc::new(ScriptedAgent::new(vec![Ok("আসসালামু আলাইকুম! ...".into())])));
        let outcome = panel.run(study("gravity")).await;
        assert_eq!(
            outcome,
            TaskOutcome::Completed(TutorReply::Text("আসসালামু আলাইকুম! ...".into()))
        );
        assert!(!panel.is_loading());
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let agent = Arc::new(ScriptedAgent::new(vec![]));
        let panel = TutorPanel::new(agent.clone());
        assert_eq!(panel.run(study("   ")).await, TaskOutcome::Ignored);
        assert_eq!(agent.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_becomes_fallback_and_clears_loading() {
        let panel = TutorPanel::new(Arc::new(ScriptedAgent::new(vec![
            Err(StudyBuddyError::remote("quota")),
            Ok("ok".into()),
        ])));

        assert_eq!(
            panel.run(study("atoms")).await,
            TaskOutcome::Failed {
                fallback: FAILURE_FALLBACK.to_string()
            }
        );
        assert!(!panel.is_loading());
        assert!(panel.run(study("atoms")).await.completed().is_some());
    }

    #[tokio::test]
    async fn test_empty_reply_uses_fallback_text() {
        let panel = TutorPanel::new(Arc::new(ScriptedAgent::new(vec![Ok("  ".into())])));
        let reply = panel.run(study("cells")).await.completed().unwrap();
        assert_eq!(reply.text(), EMPTY_REPLY_FALLBACK);
    }

    #[tokio::test]
    async fn test_translation_is_parsed() {
        let panel = TutorPanel::new(Arc::new(ScriptedAgent::new(vec![Ok(
            "TRANSLATION: I eat rice\nPRONUNCIATION: আই ইট রাইস".into(),
        )])));
        let reply = panel
            .run(TutorTask::Translate {
                text: "আমি ভাত খাই".into(),
                direction: Direction::BengaliToEnglish,
            })
            .await
            .completed()
            .unwrap();
        match reply {
            TutorReply::Translation(guide) => assert_eq!(guide.pronunciation, "আই ইট রাইস"),
            other => panic!("unexpected reply {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_second_submission_while_loading_is_busy() {
        let agent = Arc::new(GatedAgent {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let panel = Arc::new(TutorPanel::new(agent.clone()));

        let first = {
            let panel = panel.clone();
            tokio::spawn(async move { panel.run(study("first")).await })
        };
        agent.entered.notified().await;
        assert!(panel.is_loading());

        assert!(panel.run(study("second")).await.is_busy());

        agent.release.notify_one();
        assert_eq!(
            first.await.unwrap(),
            TaskOutcome::Completed(TutorReply::Text("done".into()))
        );
        assert!(!panel.is_loading());
    }

    #[tokio::test]
    async fn test_speech() {
        let panel = TutorPanel::new(Arc::new(ScriptedAgent::new(vec![])));
        let clip = panel.speak("Good morning").await.completed().unwrap();
        assert_eq!(clip.samples, vec![0, 1]);
        assert_eq!(panel.speak(" ").await, TaskOutcome::Ignored);

        let failing = TutorPanel::new(Arc::new(GatedAgent {
            entered: Notify::new(),
            release: Notify::new(),
        }));
        assert!(matches!(failing.speak("hi").await, TaskOutcome::Failed { .. }));
        assert!(!failing.is_speaking());
    }
}
