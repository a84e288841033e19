#![cfg(test)]

use crate::test::{attributes, setup};
use soroban_sdk::{testutils::Address as _, Address, String};

#[test]
fn test_projection_without_proposals() {
    let s = setup();
    let wallet = Address::generate(&s.env);

    let contributor = s.client.get_contributor_projected_fund(&wallet);
    assert_eq!(contributor.project_count, 0);
    assert_eq!(contributor.data.len(), 0);
    assert_eq!(contributor.total_amount, 0);
    assert_eq!(contributor.withdraw_amount, 0);
    assert_eq!(contributor.total_with_balance, 0);

    let sponsor = s.client.get_sponsor_projected_fund(&wallet);
    assert_eq!(sponsor.project_count, 0);
    assert_eq!(sponsor.total_sponsor_bond, 0);
}

#[test]
fn test_contributor_projection_sums_next_installments() {
    let s = setup();
    let contributor = Address::generate(&s.env);
    let other = Address::generate(&s.env);
    let sponsor = Address::generate(&s.env);

    let p1 = attributes(&s.env, "bafy-p1", 100, 9, 3, &contributor, &sponsor);
    let p2 = attributes(&s.env, "bafy-p2", 50, 4, 2, &contributor, &sponsor);
    let p3 = attributes(&s.env, "bafy-p3", 70, 7, 7, &other, &sponsor);
    s.client.deposit_proposal_fund(&s.cpf_treasury, &p1);
    s.client.deposit_proposal_fund(&s.cpf_treasury, &p2);
    s.client.deposit_proposal_fund(&s.cpf_treasury, &p3);

    s.client.send_installment_to_contributor(&s.cps_score, &p1.ipfs_hash);

    let report = s.client.get_contributor_projected_fund(&contributor);
    assert_eq!(report.project_count, 2);
    // 67 / 2 left on p1, 50 / 2 on p2
    assert_eq!(report.total_amount, 33 + 25);
    assert_eq!(report.withdraw_amount, 33);
    assert_eq!(report.total_with_balance, 33 + 25 + 33);
    assert_eq!(report.total_sponsor_bond, 0);

    let first = report.data.get(0).unwrap();
    assert_eq!(first.ipfs_hash, p1.ipfs_hash);
    assert_eq!(first.track_budget, 100);
    assert_eq!(first.total_paid_amount, 33);
    assert_eq!(first.total_installment_count, 3);
    assert_eq!(first.remaining_installment_count, 2);
    assert_eq!(first.installment_amount, 33);

    // Projection is read-only
    assert_eq!(s.client.get_proposal(&p1.ipfs_hash).installment_count, 2);
}

#[test]
fn test_projection_of_final_installment_uses_remaining() {
    let s = setup();
    let contributor = Address::generate(&s.env);
    let sponsor = Address::generate(&s.env);
    let p1 = attributes(&s.env, "bafy-p1", 10, 0, 3, &contributor, &sponsor);
    s.client.deposit_proposal_fund(&s.cpf_treasury, &p1);

    s.client.send_installment_to_contributor(&s.cps_score, &p1.ipfs_hash);
    s.client.send_installment_to_contributor(&s.cps_score, &p1.ipfs_hash);

    let report = s.client.get_contributor_projected_fund(&contributor);
    assert_eq!(report.project_count, 1);
    assert_eq!(report.total_amount, 4);
    assert_eq!(report.withdraw_amount, 6);
}

#[test]
fn test_projection_excludes_terminal_proposals() {
    let s = setup();
    let contributor = Address::generate(&s.env);
    let sponsor = Address::generate(&s.env);

    let active = attributes(&s.env, "bafy-active", 30, 3, 3, &contributor, &sponsor);
    let disqualified = attributes(&s.env, "bafy-disq", 40, 4, 2, &contributor, &sponsor);
    let completed = attributes(&s.env, "bafy-done", 12, 2, 1, &contributor, &sponsor);
    s.client.deposit_proposal_fund(&s.cpf_treasury, &active);
    s.client.deposit_proposal_fund(&s.cpf_treasury, &disqualified);
    s.client.deposit_proposal_fund(&s.cpf_treasury, &completed);

    s.client.disqualify_project(&s.cps_score, &disqualified.ipfs_hash);
    s.client.send_installment_to_contributor(&s.cps_score, &completed.ipfs_hash);
    s.client.send_reward_to_sponsor(&s.cps_score, &completed.ipfs_hash);

    let report = s.client.get_contributor_projected_fund(&contributor);
    assert_eq!(report.project_count, 1);
    assert_eq!(report.data.get(0).unwrap().ipfs_hash, String::from_str(&s.env, "bafy-active"));
    assert_eq!(report.total_amount, 10);
    // Completed proposal's payout is already in the fund record
    assert_eq!(report.withdraw_amount, 12);

    let report = s.client.get_sponsor_projected_fund(&sponsor);
    assert_eq!(report.project_count, 1);
    assert_eq!(report.total_amount, 1);
    assert_eq!(report.withdraw_amount, 2);
}

#[test]
fn test_sponsor_projection_reports_bond() {
    let s = setup();
    let contributor = Address::generate(&s.env);
    let sponsor = Address::generate(&s.env);

    let p1 = attributes(&s.env, "bafy-p1", 100, 9, 3, &contributor, &sponsor);
    let p2 = attributes(&s.env, "bafy-p2", 250, 10, 5, &contributor, &sponsor);
    s.client.deposit_proposal_fund(&s.cpf_treasury, &p1);
    s.client.deposit_proposal_fund(&s.cpf_treasury, &p2);

    let report = s.client.get_sponsor_projected_fund(&sponsor);
    assert_eq!(report.project_count, 2);
    assert_eq!(report.total_amount, 3 + 2);
    assert_eq!(report.total_sponsor_bond, 10 + 25);
    assert_eq!(report.data.get(1).unwrap().sponsor_bond_amount, 25);
    assert_eq!(report.data.get(1).unwrap().track_budget, 10);

    // The contributor is not a sponsor anywhere
    let report = s.client.get_sponsor_projected_fund(&contributor);
    assert_eq!(report.project_count, 0);
}
