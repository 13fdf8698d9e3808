//! GraphQL documents sent to the indexer.

pub const AGENT_QUERY: &str = r#"query Agent($id: String!) {
  agent(id: $id) {
    id
    isActive
    isAvailable
    stablecoinDecimals
    stablecoinToken
    stablecoinStake
    daoTokenStake
    disputeFeeBps
    assignmentFeeBps
    description
    contact
    totalResolved
    activeCases
    totalEscrowsAssigned
    registrationTime
    lastEngagementTimestamp
    totalEarnings
    totalSlashed
    cases(limit: 5, orderBy: "invitedAt", orderDirection: "desc") {
      items {
        id
        escrow
        invitedAt
        resolvedAt
        timedOut
        escrowRef {
          id
          amount
          token
          state
        }
      }
      totalCount
    }
  }
}
"#;

pub const AGENTS_QUERY: &str = r#"query Agents($where: agentFilter, $orderBy: String, $orderDirection: String, $limit: Int, $offset: Int) {
  agents(where: $where, orderBy: $orderBy, orderDirection: $orderDirection, limit: $limit, offset: $offset) {
    totalCount
    items {
      id
      isActive
      isAvailable
      stablecoinDecimals
      stablecoinStake
      daoTokenStake
      disputeFeeBps
      assignmentFeeBps
      description
      contact
      totalResolved
      activeCases
      totalEscrowsAssigned
      registrationTime
      lastEngagementTimestamp
      totalEarnings
      totalSlashed
    }
    pageInfo {
      hasNextPage
      hasPreviousPage
    }
  }
}
"#;

pub const ESCROW_QUERY: &str = r#"query escrow($id: String!) {
  escrow(id: $id) {
    id
    chainId
    buyer
    seller
    agent
    amount
    token
    state
    createdAt
    sellerAcceptDeadline
    buyerProtectionTime
    termsHash
    version
    fundedAt
    fulfilledAt
    resolvedAt
    agentInvitedAt
    splitProposer
    proposedBuyerBps
    proposedSellerBps
    buyerApprovedSplit
    sellerApprovedSplit
    agentFeeReceived
    buyerReceived
    sellerReceived
    creationFee
  }
}
"#;

pub const ESCROWS_QUERY: &str = r#"query escrows(
  $limit: Int = 30
  $offset: Int = 0
  $orderBy: String = "createdAt"
  $orderDirection: String = "desc"
  $where: escrowFilter
) {
  escrows(
    limit: $limit
    offset: $offset
    orderBy: $orderBy
    orderDirection: $orderDirection
    where: $where
  ) {
    items {
      id
      chainId
      buyer
      seller
      agent
      amount
      token
      state
      createdAt
      fundedAt
      fulfilledAt
      sellerAcceptDeadline
      agentInvitedAt
      buyerProtectionTime
      splitProposer
      buyerApprovedSplit
      sellerApprovedSplit
      proposedBuyerBps
      proposedSellerBps
    }
    pageInfo {
      hasNextPage
      hasPreviousPage
    }
    totalCount
  }
}
"#;

pub const PROTOCOL_STATS_QUERY: &str = r#"query protocolStats($id: String! = "mainnet", $agentLimit: Int = 1000) {
  protocolStats(id: $id) {
    id
    chainId
    totalEscrowsCreated
    totalVolumeEscrowed
    totalFeesCollected
    currentTVL
    activeEscrowCount
    totalAgentsRegistered
    activeAgentsCount
  }
  agents(where: { isActive: true }, limit: $agentLimit) {
    items {
      stablecoinStake
    }
  }
}
"#;

pub const TRANSACTION_LOGS_QUERY: &str = r#"query transactionLogs(
  $escrowAddress: String
  $limit: Int
  $offset: Int
  $orderBy: String
  $orderDirection: String
) {
  transactionLogs(
    where: { escrowAddress: $escrowAddress }
    limit: $limit
    offset: $offset
    orderBy: $orderBy
    orderDirection: $orderDirection
  ) {
    items {
      id
      txHash
      blockNumber
      timestamp
      eventName
      contractAddress
      contractType
      escrowAddress
      agentAddress
      userAddress
      eventData
    }
  }
}
"#;
