//! Canned user-facing replies.

pub const START: &str = "Welcome to the Debt Tracker Bot! Start by sending a list of debts in this format:\n\nMacDonalds\n98765432\n@user1 9.6\n@user2 5.4\n@user3 3.0";

pub const EXAMPLE: &str = "Send a message with the following format:\n\nDEBT_NAME\nPHONE_NUMBER\n@user_handle AMOUNT_OWED\n@user_handle AMOUNT_OWED\n@user_handle AMOUNT_OWED\n\nExample:\n\nMacDonalds\n98765432\n@user1 9.6\n@user2 5.4\n@user3 3.0";

pub const HELP: &str = "Here are the available commands:\n\n/getgroups - Get a list of groups you are in\n/show - Show all your debt lists\n/clear - Clear all your debt lists\n/help - Show this message";

pub const UNKNOWN_COMMAND: &str =
    "Sorry, I don't understand that command. Use /help for a list of commands";

pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

pub const CONFIRM_PROMPT: &str = "Please confirm that the information is correct.";

pub const CONFIRM_STALE: &str = "That debt list does not exist or has already been confirmed";

pub const NO_GROUPS: &str = "You are not in any groups. Add me to a group and send a message to the group (so I know you are in the group)";

pub const GETGROUPS_NONE: &str = "I couldn't find any groups. If we are in the same group, please make sure I have access to messages and that you have sent a message in the group.";

pub const GETGROUPS_HEADER: &str = "You're in the following groups:\n\n";

pub const CHOOSE_GROUP: &str = "Choose which group to send this list to:";

pub const LIST_SENT: &str = "The debt list has been sent to:";

pub const LIST_GONE: &str = "That debt list no longer exists.";

pub const NOT_A_PARTICIPANT: &str = "You don't have any debt to pay in that list!";

pub const NO_USERNAME: &str =
    "You need a Telegram username so I can match you to a debt entry.";

pub const SHOW_HEADER: &str = "Here are your debt lists:\n\n";

pub const SHOW_SEPARATOR: &str = "\n\n###################################\n\n";

pub const NO_DEBT_LISTS: &str = "You do not have any debt lists.";

pub const CLEAR_PROMPT: &str = "Are you sure you want to delete all your debt lists?";

pub const CLEARED: &str = "All your debt lists have been cleared.";

pub const NOTHING_TO_CLEAR: &str = "You have no debt lists to clear.";
