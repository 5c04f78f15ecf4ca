/// Entries of the interactive main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    TypeText,
    LoadFile,
    ListVoices,
    GenerateSamples,
    SsmlText,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 6] = [
        MenuAction::TypeText,
        MenuAction::LoadFile,
        MenuAction::ListVoices,
        MenuAction::GenerateSamples,
        MenuAction::SsmlText,
        MenuAction::Exit,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            MenuAction::TypeText => "1",
            MenuAction::LoadFile => "2",
            MenuAction::ListVoices => "3",
            MenuAction::GenerateSamples => "4",
            MenuAction::SsmlText => "5",
            MenuAction::Exit => "6",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::TypeText => "Convert text from keyboard input",
            MenuAction::LoadFile => "Convert text from file",
            MenuAction::ListVoices => "List available voices",
            MenuAction::GenerateSamples => "Generate sample with different voices",
            MenuAction::SsmlText => "Advanced: Use SSML features",
            MenuAction::Exit => "Exit",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL.into_iter().find(|action| action.key() == input)
    }
}
