// region:    --- Accounts
/// 계정 단건 조회
pub const GET_ACCOUNT: &str = r#"
    SELECT id, title, description, price, skins, collector_level, category, images,
           is_sold, sold_at, deleted_at, created_at, updated_at
    FROM accounts
    WHERE id = $1
"#;

/// 계정 페이지 조회 (최신순), $3/$4 는 선택 필터
pub const GET_ACCOUNTS_PAGE: &str = r#"
    SELECT id, title, description, price, skins, collector_level, category, images,
           is_sold, sold_at, deleted_at, created_at, updated_at
    FROM accounts
    WHERE ($3::TEXT IS NULL OR category = $3)
      AND ($4::TEXT IS NULL OR collector_level = $4)
    ORDER BY created_at DESC
    LIMIT $1 OFFSET $2
"#;

/// 계정 수 조회, 페이지 조회와 같은 필터
pub const COUNT_ACCOUNTS: &str = r#"
    SELECT COUNT(*) FROM accounts
    WHERE ($1::TEXT IS NULL OR category = $1)
      AND ($2::TEXT IS NULL OR collector_level = $2)
"#;

/// 카테고리별 최신 계정
pub const GET_LATEST_ACCOUNTS_BY_CATEGORY: &str = r#"
    SELECT id, title, description, price, skins, collector_level, category, images,
           is_sold, sold_at, deleted_at, created_at, updated_at
    FROM accounts
    WHERE category = $1
    ORDER BY created_at DESC
    LIMIT $2
"#;

/// 제목 검색 (판매 중인 계정만)
pub const SEARCH_ACCOUNTS: &str = r#"
    SELECT id, title, description, price, skins, collector_level, category, images,
           is_sold, sold_at, deleted_at, created_at, updated_at
    FROM accounts
    WHERE title ILIKE $1 AND is_sold = FALSE
    ORDER BY created_at DESC
    LIMIT $2
"#;

/// 계정 생성
pub const INSERT_ACCOUNT: &str = r#"
    INSERT INTO accounts (title, description, price, skins, collector_level, category, images, created_at, updated_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
    RETURNING id, title, description, price, skins, collector_level, category, images,
              is_sold, sold_at, deleted_at, created_at, updated_at
"#;

/// 계정 수정 (삭제 대기 중이면 적용되지 않음)
pub const UPDATE_ACCOUNT: &str = r#"
    UPDATE accounts
    SET title = $2, description = $3, price = $4, skins = $5, collector_level = $6,
        category = $7, images = $8, updated_at = $9
    WHERE id = $1 AND deleted_at IS NULL
    RETURNING id, title, description, price, skins, collector_level, category, images,
              is_sold, sold_at, deleted_at, created_at, updated_at
"#;

/// 이미지 목록 변경 (삭제 대기 중이면 적용되지 않음)
pub const UPDATE_ACCOUNT_IMAGES: &str = r#"
    UPDATE accounts
    SET images = $2, updated_at = $3
    WHERE id = $1 AND deleted_at IS NULL
    RETURNING id, title, description, price, skins, collector_level, category, images,
              is_sold, sold_at, deleted_at, created_at, updated_at
"#;

/// 판매/삭제 표시 변경
pub const UPDATE_DELETION_MARKS: &str = r#"
    UPDATE accounts
    SET is_sold = $2, sold_at = $3, deleted_at = $4, updated_at = $5
    WHERE id = $1
    RETURNING id, title, description, price, skins, collector_level, category, images,
              is_sold, sold_at, deleted_at, created_at, updated_at
"#;

/// 계정 삭제
pub const DELETE_ACCOUNT: &str = "DELETE FROM accounts WHERE id = $1";

/// 유예 기간이 지난 계정 조회
pub const GET_EXPIRED_ACCOUNTS: &str =
    "SELECT id, images FROM accounts WHERE deleted_at < $1 ORDER BY deleted_at";

/// 여전히 만료 상태인 경우에만 삭제
pub const DELETE_ACCOUNT_IF_EXPIRED: &str =
    "DELETE FROM accounts WHERE id = $1 AND deleted_at < $2 RETURNING images";

// endregion: --- Accounts

// region:    --- Ads
/// 전체 광고 (관리자)
pub const GET_ALL_ADS: &str =
    "SELECT id, title, image_url, link, order_index, is_active, created_at FROM ads ORDER BY order_index";

/// 노출 중인 광고
pub const GET_ACTIVE_ADS: &str = "SELECT id, title, image_url, link, order_index, is_active, created_at FROM ads WHERE is_active = TRUE ORDER BY order_index";

pub const GET_AD: &str =
    "SELECT id, title, image_url, link, order_index, is_active, created_at FROM ads WHERE id = $1";

pub const INSERT_AD: &str = r#"
    INSERT INTO ads (title, image_url, link, order_index, is_active)
    VALUES ($1, $2, $3, $4, TRUE)
    RETURNING id, title, image_url, link, order_index, is_active, created_at
"#;

pub const UPDATE_AD: &str = r#"
    UPDATE ads
    SET title = $2, image_url = $3, link = $4, order_index = $5, is_active = TRUE
    WHERE id = $1
    RETURNING id, title, image_url, link, order_index, is_active, created_at
"#;

pub const DELETE_AD: &str = "DELETE FROM ads WHERE id = $1";

// endregion: --- Ads

// region:    --- Rank Boost
/// 랭크 부스트 전체 (최신순)
pub const GET_ALL_RANK_BOOSTS: &str =
    "SELECT id, title, price, created_at FROM rank_boost ORDER BY created_at DESC";

pub const GET_RANK_BOOSTS_PAGE: &str =
    "SELECT id, title, price, created_at FROM rank_boost ORDER BY created_at DESC LIMIT $1 OFFSET $2";

pub const COUNT_RANK_BOOSTS: &str = "SELECT COUNT(*) FROM rank_boost";

pub const INSERT_RANK_BOOST: &str =
    "INSERT INTO rank_boost (title, price) VALUES ($1, $2) RETURNING id, title, price, created_at";

pub const UPDATE_RANK_BOOST: &str =
    "UPDATE rank_boost SET title = $2, price = $3 WHERE id = $1 RETURNING id, title, price, created_at";

pub const DELETE_RANK_BOOST: &str = "DELETE FROM rank_boost WHERE id = $1";

// endregion: --- Rank Boost

// region:    --- Admin
pub const GET_ADMIN_BY_EMAIL: &str =
    "SELECT id, email, password_hash, created_at FROM admin_users WHERE email = $1";

pub const GET_ADMIN_BY_ID: &str =
    "SELECT id, email, password_hash, created_at FROM admin_users WHERE id = $1";

pub const INSERT_ADMIN: &str = r#"
    INSERT INTO admin_users (email, password_hash)
    VALUES ($1, $2)
    ON CONFLICT (email) DO NOTHING
    RETURNING id
"#;

pub const UPDATE_ADMIN_PASSWORD: &str =
    "UPDATE admin_users SET password_hash = $2 WHERE id = $1";

pub const INSERT_SESSION: &str =
    "INSERT INTO admin_sessions (token, admin_id, created_at, expires_at) VALUES ($1, $2, $3, $4)";

/// 만료되지 않은 세션과 관리자 정보
pub const GET_SESSION: &str = r#"
    SELECT s.token, s.admin_id, u.email, s.expires_at
    FROM admin_sessions s
    JOIN admin_users u ON u.id = s.admin_id
    WHERE s.token = $1 AND s.expires_at > $2
"#;

pub const DELETE_SESSION: &str = "DELETE FROM admin_sessions WHERE token = $1";

/// 비밀번호 변경 시 현재 세션을 제외한 나머지 세션 삭제
pub const DELETE_OTHER_SESSIONS: &str =
    "DELETE FROM admin_sessions WHERE admin_id = $1 AND token <> $2";

pub const DELETE_EXPIRED_SESSIONS: &str = "DELETE FROM admin_sessions WHERE expires_at <= $1";

// endregion: --- Admin
