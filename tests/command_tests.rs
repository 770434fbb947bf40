use codepatch::commands::help_text;
use codepatch::{
    get_command_type, is_builtin_command, process_builtin_command, BuiltinCommand,
    CommandOutcome, CommandType, UnknownCommand,
};

#[test]
fn test_direct_commands() {
    for word in ["exit", "quit", "q", "help", "version", "clear"] {
        assert_eq!(get_command_type(word), CommandType::Direct, "{}", word);
    }
}

#[test]
fn test_convert_commands() {
    for word in ["time", "date", "weather"] {
        assert_eq!(get_command_type(word), CommandType::Convert, "{}", word);
    }
}

#[test]
fn test_matching_ignores_case_and_surrounding_whitespace() {
    assert_eq!(get_command_type("  HeLp \n"), CommandType::Direct);
    assert_eq!(get_command_type("\tWEATHER"), CommandType::Convert);
    assert!(is_builtin_command(" Q "));
}

#[test]
fn test_other_input_is_not_a_command() {
    for input in ["", "   ", "what time is it", "help me", "exit now", "times"] {
        assert_eq!(get_command_type(input), CommandType::None, "{:?}", input);
        assert!(!is_builtin_command(input));
    }
}

#[test]
fn test_from_str() {
    assert_eq!("quit".parse::<BuiltinCommand>(), Ok(BuiltinCommand::Exit));
    assert_eq!("Date".parse::<BuiltinCommand>(), Ok(BuiltinCommand::Date));
    assert_eq!(
        "deploy".parse::<BuiltinCommand>(),
        Err(UnknownCommand("deploy".to_string()))
    );
    assert_eq!(BuiltinCommand::Exit.to_string(), "exit");
}

#[test]
fn test_process_direct_commands() {
    assert_eq!(process_builtin_command("exit"), CommandOutcome::Exit);
    assert_eq!(process_builtin_command("clear"), CommandOutcome::ClearScreen);
    assert_eq!(
        process_builtin_command("version"),
        CommandOutcome::Display(format!("codepatch v{}", env!("CARGO_PKG_VERSION")))
    );
    assert_eq!(
        process_builtin_command("HELP"),
        CommandOutcome::Display(help_text())
    );
}

#[test]
fn test_process_convert_commands_forward_prompts() {
    for command in [
        BuiltinCommand::Time,
        BuiltinCommand::Date,
        BuiltinCommand::Weather,
    ] {
        let prompt = command.prompt().unwrap();
        assert_eq!(
            process_builtin_command(&command.to_string()),
            CommandOutcome::Forward(prompt.to_string())
        );
    }
}

#[test]
fn test_pass_through_keeps_input_verbatim() {
    let input = "  Please fix the bug in main.rs  ";
    assert_eq!(
        process_builtin_command(input),
        CommandOutcome::PassThrough(input.to_string())
    );
}

#[test]
fn test_help_lists_every_command() {
    let help = help_text();
    for command in BuiltinCommand::ALL {
        for name in command.names() {
            assert!(help.contains(name), "help text is missing '{}'", name);
        }
    }
}
