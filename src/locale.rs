//! Locale-keyed audit detail catalog
//!
//! Two-level mapping: language tag -> rule id -> detail record, built once
//! behind a `OnceLock` and shared read-only across scan workers. Lookup
//! falls back exact rule id -> kind-based entry -> `DEFAULT`; several rule
//! ids (the per-rule JS/TS security ids among them) deliberately have no
//! entry of their own and resolve through the kind fallback.
//!
//! Locale affects finding text only. Thresholds, counters, and the score
//! never read from here.

use crate::models::{Category, RiskKind};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Resolved presentation record for one rule id.
#[derive(Debug, Clone, Copy)]
pub struct AuditDetail {
    pub title: &'static str,
    pub category: Category,
    /// Empty when the evidence is dynamic (filled from the rule match).
    pub evidence: &'static str,
    pub standard: &'static str,
    pub impact: &'static str,
    pub action: &'static str,
    pub reference: &'static str,
    pub when_it_matters: &'static str,
}

type RuleCatalog = HashMap<&'static str, AuditDetail>;

static CATALOG: OnceLock<HashMap<&'static str, RuleCatalog>> = OnceLock::new();

fn catalog() -> &'static HashMap<&'static str, RuleCatalog> {
    CATALOG.get_or_init(|| {
        let mut langs = HashMap::new();
        langs.insert("en", en_catalog());
        langs.insert("ko", ko_catalog());
        langs
    })
}

/// Resolve the audit detail for a rule id in the given locale.
///
/// Fallback chain, preserved exactly: exact rule id, then the kind-mapped
/// entry (`SecurityRisk` -> RR-SEC-001, `CircularDependency` -> RR-DEP-001,
/// `GodModule` -> RR-LINT-001), then `DEFAULT`. Unknown locales fall back
/// to English.
pub fn resolve(lang: &str, rule_id: &str, kind: RiskKind) -> &'static AuditDetail {
    let rules = catalog().get(lang).unwrap_or_else(|| &catalog()["en"]);

    if let Some(detail) = rules.get(rule_id) {
        return detail;
    }
    let fallback_id = match kind {
        RiskKind::SecurityRisk => "RR-SEC-001",
        RiskKind::CircularDependency => "RR-DEP-001",
        RiskKind::GodModule => "RR-LINT-001",
        _ => "DEFAULT",
    };
    rules
        .get(fallback_id)
        .unwrap_or_else(|| &rules["DEFAULT"])
}

/// Closing disclosure attached to every result.
pub fn disclosure(lang: &str) -> &'static str {
    match lang {
        "ko" => {
            "배포 전 감사가 완료되었습니다. 발견된 리스크는 운영 환경에서 \
             서비스 중단이나 데이터 손실로 이어질 수 있는 항목들입니다."
        }
        _ => {
            "Pre-deploy audit complete. Detected risks may cause service \
             interruptions or data loss in production."
        }
    }
}

/// Call-to-action string attached to every result.
pub fn cta(lang: &str) -> &'static str {
    match lang {
        "ko" => "배포 루틴을 자동화하고 릴리스 준비도를 지속적으로 관리하세요.",
        _ => "Automate this ritual and track release readiness continuously.",
    }
}

fn en_catalog() -> RuleCatalog {
    let mut rules = RuleCatalog::new();

    rules.insert(
        "RR-SEC-001",
        AuditDetail {
            title: "Security Vulnerability Detected",
            category: Category::Security,
            evidence: "",
            standard: "OWASP Top 10 A03:2021 - Injection",
            impact: "Potential for unauthorized access or data leakage through injection attacks.",
            action: "Isolate untrusted input; prefer subprocess calls without a shell and load secrets from the environment.",
            reference: "https://owasp.org/Top10/A03_2021-Injection/",
            when_it_matters: "Immediately upon deployment, as automated scanners can detect this.",
        },
    );
    rules.insert(
        "RR-TEST-001",
        AuditDetail {
            title: "Missing Automated Tests",
            category: Category::ServiceInterruption,
            evidence: "No tests/ directory or test framework configuration found.",
            standard: "pytest Framework Documentation",
            impact: "No way to verify that changes keep existing features working. High regression risk.",
            action: "Create a tests/ directory with at least a smoke test per entry point.",
            reference: "https://docs.pytest.org/",
            when_it_matters: "When team size exceeds two or deployment frequency increases.",
        },
    );
    rules.insert(
        "RR-CI-001",
        AuditDetail {
            title: "Missing CI Pipeline",
            category: Category::ServiceInterruption,
            evidence: "No GitHub Actions (.github/workflows) or other CI configuration found.",
            standard: "GitHub Actions Documentation",
            impact: "Manual deployments are prone to human error and lack consistency.",
            action: "Add a CI workflow that runs the test suite on every push.",
            reference: "https://docs.github.com/en/actions",
            when_it_matters: "When deploying more than twice a week.",
        },
    );
    rules.insert(
        "RR-OPS-001",
        AuditDetail {
            title: "Project Hygiene Check Failed",
            category: Category::ServiceInterruption,
            evidence: "",
            standard: "12-Factor App / Docker Documentation",
            impact: "Inconsistency between dev and prod environments (\"works on my machine\").",
            action: "Add the missing artifacts: Dockerfile, dependency lockfile, .env.example, .gitignore.",
            reference: "https://12factor.net/",
            when_it_matters: "Onboarding new members or migrating servers.",
        },
    );
    rules.insert(
        "RR-LOG-001",
        AuditDetail {
            title: "Insufficient Logging",
            category: Category::Maintenance,
            evidence: "No logging configuration (logging, loguru) found in the codebase.",
            standard: "Python Logging Cookbook",
            impact: "Zero visibility into runtime errors, making debugging impossible during outages.",
            action: "Configure a logger at startup and route diagnostics through it.",
            reference: "https://docs.python.org/3/howto/logging-cookbook.html",
            when_it_matters: "When a 500 error occurs in production.",
        },
    );
    rules.insert(
        "RR-DEP-001",
        AuditDetail {
            title: "Structural Dependency Issue",
            category: Category::Scalability,
            evidence: "",
            standard: "Clean Architecture: Dependency Rule",
            impact: "High coupling between modules makes maintenance difficult and increases side effects.",
            action: "Break the cycle: extract shared logic into a third module or invert one dependency.",
            reference: "https://refactoring.guru/design-patterns",
            when_it_matters: "As the codebase grows, refactoring costs explode.",
        },
    );
    rules.insert(
        "RR-LINT-001",
        AuditDetail {
            title: "God Module Detected",
            category: Category::Maintenance,
            evidence: "",
            standard: "Clean Code: Functions",
            impact: "A single file carries too many responsibilities, making every change risky.",
            action: "Split the file along responsibility boundaries.",
            reference: "https://refactoring.guru/smells/large-class",
            when_it_matters: "When every feature addition causes a regression bug.",
        },
    );
    rules.insert(
        "RR-SYN-001",
        AuditDetail {
            title: "Syntax Error Detected",
            category: Category::ServiceInterruption,
            evidence: "",
            standard: "Python Language Reference",
            impact: "The module cannot be imported at all; any code path touching it fails at startup.",
            action: "Fix the reported compile error before deploying.",
            reference: "https://docs.python.org/3/reference/",
            when_it_matters: "At the next restart or deploy of the service.",
        },
    );
    rules.insert(
        "DEFAULT",
        AuditDetail {
            title: "Other Potential Risks",
            category: Category::Maintenance,
            evidence: "",
            standard: "General Coding Best Practices",
            impact: "Potential bugs or maintenance debt.",
            action: "Review the flagged code and consider refactoring.",
            reference: "#",
            when_it_matters: "When code quality starts to degrade.",
        },
    );

    rules
}

fn ko_catalog() -> RuleCatalog {
    let mut rules = RuleCatalog::new();

    rules.insert(
        "RR-SEC-001",
        AuditDetail {
            title: "보안 취약점 위험 (Security Vulnerability)",
            category: Category::Security,
            evidence: "",
            standard: "OWASP Top 10 A03:2021 - Injection",
            impact: "외부 공격자가 시스템 권한을 탈취하거나 민감 정보를 유출할 수 있습니다.",
            action: "신뢰할 수 없는 입력을 격리하고, shell 없는 subprocess 호출과 환경변수 기반 시크릿을 사용하세요.",
            reference: "https://owasp.org/Top10/A03_2021-Injection/",
            when_it_matters: "배포 즉시 자동화된 스캐너나 공격자에 의해 탐지될 수 있습니다.",
        },
    );
    rules.insert(
        "RR-TEST-001",
        AuditDetail {
            title: "자동화 테스트 부재 (Missing Automated Tests)",
            category: Category::ServiceInterruption,
            evidence: "tests/ 디렉토리 또는 테스트 프레임워크 설정을 찾을 수 없습니다.",
            standard: "pytest Framework Documentation",
            impact: "코드 변경 시 기존 기능 파괴 여부를 확인할 방법이 없어 장애 확률이 높아집니다.",
            action: "tests/ 디렉토리를 만들고 진입점마다 최소한의 스모크 테스트를 추가하세요.",
            reference: "https://docs.pytest.org/",
            when_it_matters: "팀원이 2명 이상으로 늘어나거나 배포 주기가 빨라질 때.",
        },
    );
    rules.insert(
        "RR-CI-001",
        AuditDetail {
            title: "배포 자동화 파이프라인 부재 (Missing CI Pipeline)",
            category: Category::ServiceInterruption,
            evidence: "GitHub Actions (.github/workflows) 또는 CI 설정 파일이 없습니다.",
            standard: "GitHub Actions Documentation",
            impact: "수동 배포 과정에서 실수가 발생할 수 있으며 일관된 배포 상태를 보장할 수 없습니다.",
            action: "push마다 테스트를 실행하는 CI 워크플로를 추가하세요.",
            reference: "https://docs.github.com/en/actions",
            when_it_matters: "배포 빈도가 주 2회 이상으로 증가할 때.",
        },
    );
    rules.insert(
        "RR-OPS-001",
        AuditDetail {
            title: "운영 기본 위생 체크 실패 (Project Hygiene)",
            category: Category::ServiceInterruption,
            evidence: "",
            standard: "12-Factor App / Docker Documentation",
            impact: "개발 환경과 운영 환경의 불일치로 '내 컴퓨터에서는 되는데' 문제가 발생합니다.",
            action: "누락된 항목을 추가하세요: Dockerfile, 의존성 lockfile, .env.example, .gitignore.",
            reference: "https://12factor.net/",
            when_it_matters: "신규 입사자 온보딩 또는 서버 이관 시.",
        },
    );
    rules.insert(
        "RR-LOG-001",
        AuditDetail {
            title: "로깅 설정 미흡 (Insufficient Logging)",
            category: Category::Maintenance,
            evidence: "코드 내에서 로깅 설정(logging, loguru 등)이 발견되지 않았습니다.",
            standard: "Python Logging Cookbook",
            impact: "장애 발생 시 원인을 추적할 데이터가 없어 해결 시간이 길어집니다.",
            action: "시작 시점에 로거를 설정하고 진단 출력을 로거로 일원화하세요.",
            reference: "https://docs.python.org/3/howto/logging-cookbook.html",
            when_it_matters: "운영 중 알 수 없는 500 에러가 발생했을 때.",
        },
    );
    rules.insert(
        "RR-DEP-001",
        AuditDetail {
            title: "구조적 의존성 결함 (Structural Dependency Issue)",
            category: Category::Scalability,
            evidence: "",
            standard: "Clean Architecture: Dependency Rule",
            impact: "모듈 간 결합도가 높아져 유지보수가 어려워지고 사이드 이펙트가 발생하기 쉽습니다.",
            action: "순환을 끊으세요: 공통 로직을 제3의 모듈로 추출하거나 한쪽 의존성을 역전하세요.",
            reference: "https://refactoring.guru/design-patterns",
            when_it_matters: "프로젝트 규모가 커질수록 리팩토링 비용이 기하급수적으로 증가합니다.",
        },
    );
    rules.insert(
        "RR-LINT-001",
        AuditDetail {
            title: "거대 모듈 감지 (God Module)",
            category: Category::Maintenance,
            evidence: "",
            standard: "Clean Code: Functions",
            impact: "단일 파일의 책임이 과도하여 변경 시 영향 범위를 예측하기 어렵습니다.",
            action: "책임 단위로 파일을 분리하세요.",
            reference: "https://refactoring.guru/smells/large-class",
            when_it_matters: "기능 추가 시마다 버그가 발생할 때.",
        },
    );
    rules.insert(
        "RR-SYN-001",
        AuditDetail {
            title: "문법 오류 감지 (Syntax Error)",
            category: Category::ServiceInterruption,
            evidence: "",
            standard: "Python Language Reference",
            impact: "모듈 자체를 import할 수 없어 해당 코드 경로 전체가 기동 시점에 실패합니다.",
            action: "배포 전에 보고된 컴파일 오류를 수정하세요.",
            reference: "https://docs.python.org/3/reference/",
            when_it_matters: "다음 서비스 재시작 또는 배포 시점.",
        },
    );
    rules.insert(
        "DEFAULT",
        AuditDetail {
            title: "기타 잠재적 리스크 (Other Potential Risks)",
            category: Category::Maintenance,
            evidence: "",
            standard: "General Coding Best Practices",
            impact: "잠재적인 버그나 유지보수 부담이 있을 수 있습니다.",
            action: "해당 코드를 리뷰하고 리팩토링을 고려하세요.",
            reference: "#",
            when_it_matters: "지속적인 코드 품질 저하가 우려될 때.",
        },
    );

    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_lookup() {
        let detail = resolve("en", "RR-TEST-001", RiskKind::ProductionRisk);
        assert_eq!(detail.title, "Missing Automated Tests");
        assert_eq!(detail.category, Category::ServiceInterruption);
    }

    #[test]
    fn test_security_kind_fallback() {
        // RR-SEC-002 has no catalog entry of its own and must resolve
        // through the SecurityRisk fallback.
        let detail = resolve("en", "RR-SEC-002", RiskKind::SecurityRisk);
        assert_eq!(detail.title, "Security Vulnerability Detected");
    }

    #[test]
    fn test_production_risk_falls_to_default() {
        let detail = resolve("en", "RR-NET-001", RiskKind::ProductionRisk);
        assert_eq!(detail.title, "Other Potential Risks");
    }

    #[test]
    fn test_unknown_locale_falls_back_to_english() {
        let detail = resolve("fr", "RR-CI-001", RiskKind::ProductionRisk);
        assert_eq!(detail.title, "Missing CI Pipeline");
    }

    #[test]
    fn test_korean_catalog_covers_all_ids() {
        for id in [
            "RR-SEC-001",
            "RR-TEST-001",
            "RR-CI-001",
            "RR-OPS-001",
            "RR-LOG-001",
            "RR-DEP-001",
            "RR-LINT-001",
            "RR-SYN-001",
            "DEFAULT",
        ] {
            let detail = resolve("ko", id, RiskKind::ProductionRisk);
            // Each id resolves exactly, never through DEFAULT (except DEFAULT).
            if id != "DEFAULT" {
                assert_ne!(detail.title, resolve("ko", "DEFAULT", RiskKind::ProductionRisk).title);
            }
        }
    }
}
