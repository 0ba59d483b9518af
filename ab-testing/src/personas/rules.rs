//! Data-driven persona scoring rules.
//!
//! Every archetype is scored by the same procedure; only the [`RuleTable`]
//! differs. A table holds a base likelihood and an ordered list of rules.
//! Each rule that fires adds its delta to the running likelihood and appends
//! its factor tag, so `key_factors` follows rule order.

/// Likelihood comparison used by reasoning bands and emotion splits
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    Above(f64),
    AtLeast(f64),
}

impl Threshold {
    pub fn is_met(&self, likelihood: f64) -> bool {
        match *self {
            Threshold::Above(limit) => likelihood > limit,
            Threshold::AtLeast(limit) => likelihood >= limit,
        }
    }
}

/// Predicate over the scored content
///
/// `Category` is exact membership of the case-folded category;
/// `Text` is a case-folded substring search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    Category(&'static [&'static str]),
    Text(&'static [&'static str]),
    PriceAtMost(f64),
    PriceAbove(f64),
    Always,
}

impl Signal {
    /// `text` and `category` must already be lowercase.
    pub fn matches(&self, text: &str, category: &str, price: f64) -> bool {
        match *self {
            Signal::Category(words) => words.contains(&category),
            Signal::Text(words) => words.iter().any(|word| text.contains(word)),
            Signal::PriceAtMost(limit) => price <= limit,
            Signal::PriceAbove(limit) => price > limit,
            Signal::Always => true,
        }
    }
}

/// Likelihood adjustment applied when a signal matches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effect {
    pub signal: Signal,
    pub delta: f64,
    pub factor: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    When(Effect),
    /// Only the first matching effect applies
    FirstOf(&'static [Effect]),
}

/// Likelihood-banded reasoning sentences
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReasoningBands {
    pub opening: &'static str,
    pub high: (Threshold, &'static str),
    pub medium: (Threshold, &'static str),
    pub low: &'static str,
}

impl ReasoningBands {
    pub fn render(&self, likelihood: f64) -> String {
        let sentence = if self.high.0.is_met(likelihood) {
            self.high.1
        } else if self.medium.0.is_met(likelihood) {
            self.medium.1
        } else {
            self.low
        };
        format!("{} {}", self.opening, sentence)
    }
}

/// Binary emotional label around a likelihood threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmotionSplit {
    pub positive_when: Threshold,
    pub positive: &'static str,
    pub negative: &'static str,
}

impl EmotionSplit {
    pub fn label(&self, likelihood: f64) -> &'static str {
        if self.positive_when.is_met(likelihood) {
            self.positive
        } else {
            self.negative
        }
    }
}

/// Complete scoring configuration for one archetype
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleTable {
    pub base_likelihood: f64,
    pub rules: &'static [Rule],
    pub reasoning: ReasoningBands,
    pub emotion: EmotionSplit,
    /// `{monthly}` and `{price}` are substituted
    pub budget_template: &'static str,
}

impl RuleTable {
    /// Accumulate rule deltas, clamped to [0.0, 1.0], and the factors that fired
    pub fn evaluate(&self, text: &str, category: &str, price: f64) -> (f64, Vec<String>) {
        let text = text.to_lowercase();
        let category = category.to_lowercase();

        let mut likelihood = self.base_likelihood;
        let mut key_factors = Vec::new();

        for rule in self.rules {
            let fired = match rule {
                Rule::When(effect) => {
                    Some(effect).filter(|e| e.signal.matches(&text, &category, price))
                }
                Rule::FirstOf(effects) => effects
                    .iter()
                    .find(|e| e.signal.matches(&text, &category, price)),
            };

            if let Some(effect) = fired {
                likelihood += effect.delta;
                key_factors.push(effect.factor.to_string());
            }
        }

        (likelihood.clamp(0.0, 1.0), key_factors)
    }

    pub fn budget_note(&self, monthly_discretionary: f64, price: f64) -> String {
        self.budget_template
            .replace("{monthly}", &monthly_discretionary.to_string())
            .replace("{price}", &price.to_string())
    }
}

// ============================================================================
// Archetype tables
// ============================================================================

pub static SINGLE_MOTHER_RULES: RuleTable = RuleTable {
    base_likelihood: 0.3,
    rules: &[
        Rule::When(Effect {
            signal: Signal::Category(&["baby", "child", "family", "home", "food", "health"]),
            delta: 0.4,
            factor: "Benefits my children",
        }),
        Rule::FirstOf(&[
            Effect {
                signal: Signal::PriceAtMost(50.0),
                delta: 0.2,
                factor: "Affordable price point",
            },
            Effect {
                signal: Signal::PriceAbove(100.0),
                delta: -0.3,
                factor: "Too expensive for budget",
            },
        ]),
        Rule::When(Effect {
            signal: Signal::Text(&["safe", "certified"]),
            delta: 0.2,
            factor: "Safety certified",
        }),
        Rule::When(Effect {
            signal: Signal::Text(&["practical", "useful", "convenient", "durable"]),
            delta: 0.1,
            factor: "Practical value",
        }),
    ],
    reasoning: ReasoningBands {
        opening: "As a single mother, I need to consider how this purchase affects my children and fits our budget.",
        high: (
            Threshold::Above(0.6),
            "This seems like a good investment for our family.",
        ),
        medium: (
            Threshold::Above(0.4),
            "I'm somewhat interested but need to think about the cost.",
        ),
        low: "This doesn't seem necessary for our current needs.",
    },
    emotion: EmotionSplit {
        positive_when: Threshold::AtLeast(0.5),
        positive: "Interested and hopeful",
        negative: "Cautious but caring",
    },
    budget_template: "Monthly budget allows ${monthly}, this costs ${price}",
};

pub static YOUNG_MALE_RULES: RuleTable = RuleTable {
    base_likelihood: 0.4,
    rules: &[
        Rule::When(Effect {
            signal: Signal::Category(&[
                "tech", "gaming", "fashion", "sports", "car", "electronics",
            ]),
            delta: 0.3,
            factor: "Appeals to my interests",
        }),
        Rule::When(Effect {
            signal: Signal::Text(&["premium", "exclusive", "latest", "trending"]),
            delta: 0.2,
            factor: "Status and brand appeal",
        }),
        Rule::FirstOf(&[
            Effect {
                signal: Signal::PriceAtMost(200.0),
                delta: 0.1,
                factor: "Reasonable price",
            },
            Effect {
                signal: Signal::PriceAbove(400.0),
                delta: -0.1,
                factor: "Expensive but might be worth it",
            },
        ]),
        Rule::When(Effect {
            signal: Signal::Text(&["popular", "trending", "recommended", "rated"]),
            delta: 0.15,
            factor: "Social proof and popularity",
        }),
        Rule::When(Effect {
            signal: Signal::Text(&["fast", "instant", "immediate", "quick"]),
            delta: 0.1,
            factor: "Immediate satisfaction",
        }),
    ],
    reasoning: ReasoningBands {
        opening: "This looks pretty cool and I can afford it.",
        high: (
            Threshold::Above(0.7),
            "I'm definitely getting this - it's exactly what I want.",
        ),
        medium: (
            Threshold::Above(0.5),
            "I'm really tempted, might get it this weekend.",
        ),
        low: "Not really my thing, I'll pass.",
    },
    emotion: EmotionSplit {
        positive_when: Threshold::Above(0.6),
        positive: "Excited and impulsive",
        negative: "Mildly interested",
    },
    budget_template: "I can easily afford ${price} with my ${monthly} monthly budget",
};

pub static ELDERLY_RETIREE_RULES: RuleTable = RuleTable {
    base_likelihood: 0.2,
    rules: &[
        Rule::When(Effect {
            signal: Signal::Category(&["health", "medical", "food", "home", "utility"]),
            delta: 0.3,
            factor: "Necessary for daily life",
        }),
        Rule::FirstOf(&[
            Effect {
                signal: Signal::PriceAtMost(25.0),
                delta: 0.3,
                factor: "Very affordable",
            },
            Effect {
                signal: Signal::PriceAtMost(50.0),
                delta: 0.1,
                factor: "Reasonably priced",
            },
            Effect {
                signal: Signal::Always,
                delta: -0.2,
                factor: "Too expensive for fixed income",
            },
        ]),
        Rule::When(Effect {
            signal: Signal::Text(&["quality", "durable", "long-lasting", "reliable"]),
            delta: 0.2,
            factor: "Good quality and durability",
        }),
        Rule::FirstOf(&[
            Effect {
                signal: Signal::Text(&["simple", "easy", "basic", "traditional"]),
                delta: 0.1,
                factor: "Simple and easy to use",
            },
            Effect {
                signal: Signal::Text(&["complex", "advanced", "high-tech"]),
                delta: -0.1,
                factor: "Too complicated",
            },
        ]),
        Rule::When(Effect {
            signal: Signal::Text(&["health", "comfort", "mobility", "wellness"]),
            delta: 0.2,
            factor: "Health and wellness benefits",
        }),
    ],
    reasoning: ReasoningBands {
        opening: "At my age and on a fixed income, I need to be careful with purchases.",
        high: (
            Threshold::Above(0.6),
            "This seems like a wise investment that I actually need.",
        ),
        medium: (
            Threshold::Above(0.3),
            "I'll think about it and maybe ask my children's opinion.",
        ),
        low: "This isn't something I need right now.",
    },
    emotion: EmotionSplit {
        positive_when: Threshold::AtLeast(0.5),
        positive: "Carefully optimistic",
        negative: "Cautious and practical",
    },
    budget_template: "Fixed income limits me to ${monthly}/month, this costs ${price}",
};
