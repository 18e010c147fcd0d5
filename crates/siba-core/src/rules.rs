//! Built-in reply table.
//!
//! Order matters: the first matching rule wins. The greeting rule sits last
//! because "hi" occurs inside many words ("scholarship", "which").

use siba_types::rule::Rule;

pub const ADMISSIONS_URL: &str = "https://admissions.iba-suk.edu.pk";
pub const FEES_URL: &str = "https://www.iba-suk.edu.pk/fee-structure";
pub const PROGRAMS_URL: &str = "https://www.iba-suk.edu.pk/programs";
pub const SCHOLARSHIPS_URL: &str = "https://www.iba-suk.edu.pk/scholarships";
pub const HOME_URL: &str = "https://www.iba-suk.edu.pk";

pub const FALLBACK_REPLY: &str = "Sorry, I don't have an answer for that yet.\n\
I can help with admissions, fees, programs and scholarships.\n\
For anything else please visit https://www.iba-suk.edu.pk";

pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "admissions",
            &["admission", "apply", "application", "deadline", "entry test", "eligibility"],
            format!(
                "Admissions for the Fall intake open in June.\n\
                 Apply online and check eligibility, test dates and deadlines on the admissions portal:\n\
                 {}\n\
                 Undergraduate applicants sit the SIBA entry test; graduate programs may also require an interview.",
                ADMISSIONS_URL
            ),
        ),
        Rule::new(
            "fees",
            &["fee", "tuition", "cost", "payment", "challan"],
            format!(
                "Tuition is charged per semester and varies by program.\n\
                 The current fee structure and payment schedule are published here:\n\
                 {}\n\
                 Fee challans are issued through the student portal before each semester.",
                FEES_URL
            ),
        ),
        Rule::new(
            "programs",
            &["program", "degree", "bba", "mba", "course", "department", "computer science"],
            format!(
                "SIBA offers undergraduate and graduate programs in business administration, \
                 computer science, engineering, education and the social sciences.\n\
                 Browse every program and its curriculum at:\n\
                 {}",
                PROGRAMS_URL
            ),
        ),
        Rule::new(
            "scholarships",
            &["scholarship", "financial aid", "need-based", "merit"],
            format!(
                "Need-based and merit scholarships are available to eligible students.\n\
                 Criteria, deadlines and application forms are listed at:\n\
                 {}",
                SCHOLARSHIPS_URL
            ),
        ),
        Rule::new(
            "contact",
            &["contact", "phone", "email", "address", "location"],
            format!(
                "Sukkur IBA University, Airport Road, Sukkur, Sindh.\n\
                 Phone: +92 71 5644000\n\
                 More contact details: {}",
                HOME_URL
            ),
        ),
        Rule::new(
            "thanks",
            &["thank"],
            "You're welcome! Ask me anything else about SIBA.",
        ),
        Rule::new(
            "greeting",
            &["hello", "hi", "hey", "salam", "assalam"],
            "Hello and welcome to the SIBA Assistant!\n\
             I can answer questions about:\n\
             - Admissions\n\
             - Fees\n\
             - Programs\n\
             - Scholarships",
        ),
    ]
}
