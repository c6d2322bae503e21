use math_trainer_app::app::TrainerSession;
use math_trainer_app::database::db::init_database;
use math_trainer_app::models::challenge::progress_value;
use math_trainer_app::models::{Difficulty, Grade, Mode};
use std::io::{self, BufRead, Write};

fn prompt_line(stdin: &io::Stdin, text: &str) -> Option<String> {
    print!("{text}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

fn show_challenges(session: &TrainerSession) {
    if let Some(daily) = session.progress.daily_challenge() {
        println!(
            "Défi du jour {} : {} ({}/{})",
            daily.icon,
            daily.desc,
            progress_value(daily, &session.progress.daily_stats),
            daily.target
        );
    }
    if let Some(weekly) = session.progress.weekly_challenge() {
        println!(
            "Défi de la semaine {} : {} ({}/{})",
            weekly.icon,
            weekly.desc,
            progress_value(weekly, &session.progress.weekly_stats),
            weekly.target
        );
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let grade = Grade::from_id(&args.next().unwrap_or_default());
    let difficulty = Difficulty::from_id(&args.next().unwrap_or_default());

    let conn = init_database().expect("Failed to open trainer database");
    let mut session = TrainerSession::new(conn, grade, difficulty);

    println!(
        "Entraînement de calcul — niveau {}, difficulté {}",
        session.grade.label(),
        session.difficulty.label()
    );
    show_challenges(&session);
    println!("Tape le numéro d'un mode, 'aide' pendant une question, ou 'q' pour quitter.\n");
    for (i, mode) in Mode::ALL.into_iter().enumerate() {
        println!("  {}. {}", i + 1, mode.label());
    }

    let stdin = io::stdin();
    loop {
        let Some(choice) = prompt_line(&stdin, "\nMode ? ") else { break };
        if choice == "q" {
            break;
        }
        let mode = match choice.parse::<usize>() {
            Ok(n) if (1..=Mode::ALL.len()).contains(&n) => Mode::ALL[n - 1],
            _ => Mode::from_id(&choice),
        };

        session.refresh();
        let question = session.next_question(mode).clone();
        println!("\n{}", question.prompt);
        for (i, c) in question.choices.iter().enumerate() {
            println!("  {}. {}", i + 1, c);
        }

        let answer = loop {
            let Some(input) = prompt_line(&stdin, "Réponse ? ") else { return };
            if input == "aide" {
                for hint in question.hints().iter().take(2) {
                    println!("  💡 {hint}");
                }
                continue;
            }
            // A choice index or the answer itself
            break match input.parse::<usize>() {
                Ok(n) if (1..=question.choices.len()).contains(&n) => {
                    question.choices[n - 1].clone()
                }
                _ => input,
            };
        };

        if let Some(feedback) = session.submit_answer(&answer) {
            println!("{}", feedback.explanation);
            if !feedback.correct {
                println!("Méthode :");
                for step in question.method_steps() {
                    println!("  - {step}");
                }
            }
        }

        if let Some((coins, xp)) = session.claim_daily() {
            println!("🎉 Défi du jour terminé ! +{coins} pièces, +{xp} XP");
        }
        if let Some((coins, xp)) = session.claim_weekly() {
            println!("🎉 Défi de la semaine terminé ! +{coins} pièces, +{xp} XP");
        }
    }

    println!("\n{}", session.coach_summary());
    show_challenges(&session);
    println!(
        "Porte-monnaie : {} pièces, {} XP. À bientôt !",
        session.wallet.coins, session.wallet.xp
    );
}
