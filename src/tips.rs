use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Tip {
    pub title: &'static str,
    pub content: &'static str,
    pub science: &'static str,
}

pub static TIPS: [Tip; 5] = [
    Tip {
        title: "Self-Awareness",
        content: "Take 5 minutes daily to identify and name your current emotions. This simple practice increases emotional vocabulary and self-understanding.",
        science: "Research shows that labeling emotions activates the prefrontal cortex, which helps regulate emotional responses.",
    },
    Tip {
        title: "Empathy Building",
        content: "When interacting with others, try to identify their emotional state before responding. Ask yourself: \"What might they be feeling right now?\"",
        science: "Mirror neuron research indicates that consciously observing others' emotions strengthens our empathic neural pathways.",
    },
    Tip {
        title: "Emotional Regulation",
        content: "Use the \"STOP\" technique: Stop what you're doing, Take a breath, Observe your feelings, Proceed mindfully.",
        science: "The pause between stimulus and response allows the prefrontal cortex to override automatic emotional reactions.",
    },
    Tip {
        title: "Social Skills",
        content: "Practice active listening by summarizing what others say before adding your own thoughts. This builds stronger connections.",
        science: "Studies show that feeling heard and understood releases oxytocin, strengthening social bonds and trust.",
    },
    Tip {
        title: "Motivation",
        content: "Connect daily tasks to your larger values and goals. Ask: \"How does this align with what matters most to me?\"",
        science: "Intrinsic motivation research shows that value-aligned activities increase dopamine and sustained effort.",
    },
];

/// Cursor over [`TIPS`] that wraps in both directions.
#[derive(Debug, Clone, Default)]
pub struct TipCarousel {
    index: usize,
}

impl TipCarousel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &'static Tip {
        &TIPS[self.index]
    }

    pub fn next(&mut self) -> &'static Tip {
        self.index = (self.index + 1) % TIPS.len();
        self.current()
    }

    pub fn previous(&mut self) -> &'static Tip {
        self.index = (self.index + TIPS.len() - 1) % TIPS.len();
        self.current()
    }

    /// One-based position and total, e.g. `(2, 5)`.
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, TIPS.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_the_first_tip() {
        let carousel = TipCarousel::new();
        assert_eq!(carousel.current().title, "Self-Awareness");
        assert_eq!(carousel.position(), (1, 5));
    }

    #[test]
    fn wraps_forwards_and_backwards() {
        let mut carousel = TipCarousel::new();
        assert_eq!(carousel.previous().title, "Motivation");
        assert_eq!(carousel.position(), (5, 5));
        assert_eq!(carousel.next().title, "Self-Awareness");

        for _ in 0..TIPS.len() {
            carousel.next();
        }
        assert_eq!(carousel.position(), (1, 5));
    }
}
