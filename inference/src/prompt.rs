//! The fixed inspection prompt.
//!
//! Process-wide constant; not configurable at request time. The reply
//! shape it demands is what [`crate::parser`] is written against.

/// Inspection prompt sent with every verification image.
pub const INSPECTION_PROMPT: &str = "\
You are a safety compliance inspector.
I will provide you an image of a person in a laboratory.
Your task is to check if the person is wearing the following personal protective equipment (PPE):

Helmet (hard hat or protective headgear)
Green safety coat for visibility
Safety boots (closed-toe protective footwear)

For each item, answer yes or no

Finally, give an overall compliance status just safe or unsafe:
\"Safe\" (all PPE present)
\"Unsafe\" (if any PPE missing)

give the final response in a short format as below:
Helmet: Yes/No
Green safety coat: Yes/No
Safety boots: Yes/No
Final Compliance: Safe/Unsafe

Image: [See attached]
";

/// Item labels the prompt instructs the model to reply with, in order.
pub const ITEM_LABELS: [&str; 3] = ["Helmet", "Green safety coat", "Safety boots"];

/// Label of the summary line.
pub const FINAL_COMPLIANCE_LABEL: &str = "Final Compliance";
