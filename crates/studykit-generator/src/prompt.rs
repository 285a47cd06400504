//! Prompt templates for each artifact kind

use studykit_domain::{ArtifactKind, GenerationInput};

/// Builds the model prompt for one artifact kind
///
/// The prompt is the kind's fixed instructions followed by the caller input:
/// document text as-is, or `Words: ` and the comma-joined word list.
pub struct PromptBuilder<'a> {
    kind: ArtifactKind,
    input: &'a GenerationInput,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(kind: ArtifactKind, input: &'a GenerationInput) -> Self {
        Self { kind, input }
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let mut prompt = String::from(instructions(self.kind));
        prompt.push_str("\n\n");

        match self.input {
            GenerationInput::Text(text) => prompt.push_str(text),
            GenerationInput::Words(words) => {
                prompt.push_str("Words: ");
                prompt.push_str(&words.joined());
            }
        }

        prompt
    }
}

/// The fixed instruction block for `kind`
pub fn instructions(kind: ArtifactKind) -> &'static str {
    match kind {
        ArtifactKind::Quiz => QUIZ_INSTRUCTIONS,
        ArtifactKind::Notes => NOTES_INSTRUCTIONS,
        ArtifactKind::Mnemonics => MNEMONICS_INSTRUCTIONS,
        ArtifactKind::Story => STORY_INSTRUCTIONS,
    }
}

const QUIZ_INSTRUCTIONS: &str = r#"You are an expert educational assistant. Write a quiz that tests understanding of the course material below, usually a lecture presentation or handout.

Guidelines:
1. Read the material and identify the main topics, key concepts, definitions, theories and examples. Infer the meaning of any visuals that are described.
2. Write between 5 and 25 questions depending on how much the material covers (at least 3 if it is very short).
3. Mix formats: multiple choice with exactly 4 options, true/false, short answer and fill-in-the-blank.
4. Number the questions "Question 1", "Question 2" and so on. Never reveal the answer in the question text.
5. Prepare the correct answers in the same order, one per question, each a single concise string.
6. Keep a professional academic tone: challenging but fair. If something is unclear, make a reasonable assumption.

Return ONLY a JSON object with exactly this structure:
{
  "quiz": ["Question 1: ...", "Question 2: ..."],
  "answers": ["Answer 1: ...", "Answer 2: ..."]
}
Every question and every answer must be a single string."#;

const NOTES_INSTRUCTIONS: &str = r#"You are an expert educational assistant. Write concise study notes for the course material below, usually a lecture presentation or handout.

Guidelines:
1. Read the material and identify the main topics, key concepts, definitions, theories and examples.
2. Start with a brief summary of one or two sentences.
3. Follow with 5 to 10 bullet points (at least 3 if the material is very short), each one or two sentences long.
4. Use clear academic language suitable for revision. If something is unclear, make a reasonable assumption.

Return ONLY a JSON object with exactly this structure:
{
  "notes": ["Summary: ...", "- Bullet point 1", "- Bullet point 2"]
}
The first string is the summary; every following string is a bullet point starting with "- "."#;

const MNEMONICS_INSTRUCTIONS: &str = r#"You are an expert educational assistant. Create memory aids for the words listed below.

Guidelines:
1. Consider each word's meaning, spelling and usual context.
2. Write exactly one mnemonic per word, concise and memorable.
3. Use techniques such as acronyms ('CAT': "Cute Animal Tail"), associations ('RIVER': "Imagine a flowing river carving a valley"), imagery ('SUN': "Picture a bright sun warming your face") or rhymes ('BOOK': "Look, a book to hook your mind").
4. Keep the tone engaging but appropriate for study. If a word is unclear, make a reasonable assumption about its meaning.

Return ONLY a JSON object with exactly this structure:
{
  "mnemonics": ["Word: word1 - Mnemonic: ...", "Word: word2 - Mnemonic: ..."]
}
Each entry must be a single string."#;

const STORY_INSTRUCTIONS: &str = r#"You are a creative storytelling assistant. Write one engaging story built around the words listed below.

Guidelines:
1. Write a single continuous narrative of 300 to 500 words with a clear beginning, middle and end.
2. Use every listed word at least once, naturally. With many words, prefer natural flow over forced usage.
3. Keep it vivid and suitable for a general audience and for study.
4. Do not add headings, labels or other formatting inside the story.

Return ONLY a JSON object with exactly this structure:
{
  "story": "..."
}
The story must be a single string."#;
