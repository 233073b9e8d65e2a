/// Available commands and autocomplete logic

#[derive(Debug, Clone)]
pub struct Command {
  pub name: &'static str,
  pub aliases: &'static [&'static str],
  pub description: &'static str,
}

/// All available commands
pub const COMMANDS: &[Command] = &[
  Command {
    name: "merchants",
    aliases: &["m", "merchant"],
    description: "Browse merchants",
  },
  Command {
    name: "students",
    aliases: &["s", "student"],
    description: "Browse students and KYS",
  },
  Command {
    name: "institutions",
    aliases: &["i", "colleges"],
    description: "Browse institutions",
  },
  Command {
    name: "categories",
    aliases: &["c", "cat"],
    description: "Merchant categories",
  },
  Command {
    name: "events",
    aliases: &["e", "social"],
    description: "Social events and transactions",
  },
  Command {
    name: "subjects",
    aliases: &["sub", "topics"],
    description: "Subjects and topics",
  },
  Command {
    name: "leads",
    aliases: &["l"],
    description: "Student leads",
  },
  Command {
    name: "careers",
    aliases: &["jobs", "applicants"],
    description: "Job applications",
  },
  Command {
    name: "contactus",
    aliases: &["subscribers"],
    description: "Contact-us subscribers",
  },
  Command {
    name: "staff",
    aliases: &["st"],
    description: "Merchant staff",
  },
  Command {
    name: "quit",
    aliases: &["q", "exit"],
    description: "Exit sconto-admin",
  },
];

/// Resolve a command by exact name or alias
pub fn find(input: &str) -> Option<&'static Command> {
  let input = input.trim().to_lowercase();
  COMMANDS
    .iter()
    .find(|cmd| cmd.name == input || cmd.aliases.contains(&input.as_str()))
}

/// Get autocomplete suggestions for a given input
pub fn get_suggestions(input: &str) -> Vec<&'static Command> {
  let input_lower = input.trim().to_lowercase();

  if input_lower.is_empty() {
    return COMMANDS.iter().collect();
  }

  let mut matches: Vec<(&Command, u32)> = Vec::new();

  for cmd in COMMANDS {
    let priority = if cmd.name == input_lower {
      0
    } else if cmd.aliases.contains(&input_lower.as_str()) {
      1
    } else if cmd.name.starts_with(&input_lower) {
      2
    } else if cmd.aliases.iter().any(|a| a.starts_with(&input_lower)) {
      3
    } else if cmd.name.contains(&input_lower) {
      4
    } else if cmd.aliases.iter().any(|a| a.contains(&input_lower)) {
      5
    } else {
      continue;
    };
    matches.push((cmd, priority));
  }

  // Stable sort keeps table order within a priority
  matches.sort_by_key(|(_, priority)| *priority);

  matches.into_iter().map(|(cmd, _)| cmd).collect()
}
